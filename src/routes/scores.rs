use actix_web::{delete, get, post, web, HttpResponse, Result};

use crate::handlers::scores_handler;
use crate::models::game::{GamesQuery, ScoresByDateQuery, UpdateScoresRequest};
use crate::services::api_sports_client::GameFeed;
use crate::services::SportContext;

/// Get games of a single day (`?sport=&date=YYYY-MM-DD`)
async fn get_scores_by_date(
    query: web::Query<ScoresByDateQuery>,
    context: web::Data<SportContext>,
) -> Result<HttpResponse> {
    scores_handler::get_scores_by_date(query, context).await
}

/// Get all games, optionally by month (`?sport=&month=&year=`)
#[get("/games")]
async fn get_games(
    query: web::Query<GamesQuery>,
    context: web::Data<SportContext>,
) -> Result<HttpResponse> {
    scores_handler::get_games(query, context).await
}

/// Pull fresh scores from the provider
#[post("/update-scores")]
async fn update_scores(
    body: Option<web::Json<UpdateScoresRequest>>,
    context: web::Data<SportContext>,
    feed: web::Data<dyn GameFeed>,
) -> Result<HttpResponse> {
    scores_handler::update_scores(body, context, feed).await
}

/// Delete every stored game of the sport
#[delete("/clear-scores")]
async fn clear_scores(context: web::Data<SportContext>) -> Result<HttpResponse> {
    scores_handler::clear_scores(context).await
}

pub fn sport_scope(context: SportContext) -> actix_web::Scope {
    web::scope(&context.scope_path())
        .app_data(web::Data::new(context))
        .route("", web::get().to(get_scores_by_date))
        .service(get_games)
        .service(update_scores)
        .service(clear_scores)
}
