use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::models::game::{GamesQuery, ScoresByDateQuery, UpdateScoresRequest};
use crate::services::api_sports_client::{GameFeed, ProviderError};
use crate::services::{ScoreQueryService, ScoreSyncService, SportContext, SyncError, SyncOutcome};

/// Games of one day, for the date picker
#[tracing::instrument(
    name = "Get scores by date",
    skip(query, context),
    fields(
        sport = %context.config.sport,
        date = ?query.date
    )
)]
pub async fn get_scores_by_date(
    query: web::Query<ScoresByDateQuery>,
    context: web::Data<SportContext>,
) -> Result<HttpResponse> {
    let query_service = ScoreQueryService::new(context.store.clone());

    match query_service.list_by_date(query.sport.as_deref(), query.date.as_deref()).await {
        Ok(games) => {
            tracing::info!("Retrieved {} games", games.len());
            Ok(HttpResponse::Ok().json(games))
        }
        Err(e) => {
            tracing::error!("Failed to fetch scores: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch scores"
            })))
        }
    }
}

/// Games of a month, newest first
#[tracing::instrument(
    name = "Get games",
    skip(query, context),
    fields(
        sport = %context.config.sport,
        month = ?query.month,
        year = ?query.year
    )
)]
pub async fn get_games(
    query: web::Query<GamesQuery>,
    context: web::Data<SportContext>,
) -> Result<HttpResponse> {
    let query_service = ScoreQueryService::new(context.store.clone());

    match query_service
        .list_all(query.sport.as_deref(), query.month.as_deref(), query.year.as_deref())
        .await
    {
        Ok(games) => Ok(HttpResponse::Ok().json(games)),
        Err(e) => {
            tracing::error!("Failed to fetch games: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch games"
            })))
        }
    }
}

#[tracing::instrument(
    name = "Update scores",
    skip(body, context, feed),
    fields(sport = %context.config.sport)
)]
pub async fn update_scores(
    body: Option<web::Json<UpdateScoresRequest>>,
    context: web::Data<SportContext>,
    feed: web::Data<dyn GameFeed>,
) -> Result<HttpResponse> {
    let date = body.and_then(|body| body.into_inner().date);
    tracing::info!("Updating {} scores for date: {:?}", context.config.sport, date);

    let sync_service = ScoreSyncService::new(context.get_ref().clone(), feed.into_inner());

    match sync_service.sync(date.as_deref()).await {
        Ok(SyncOutcome::NoGames) => Ok(HttpResponse::Ok().json(json!({
            "message": "No games found to update"
        }))),
        Ok(SyncOutcome::Synced(summary)) => Ok(HttpResponse::Ok().json(json!({
            "message": format!(
                "{} {} scores updated successfully",
                context.config.default_league_name,
                context.config.sport
            ),
            "fetched": summary.fetched,
            "updated": summary.updated,
            "skipped": summary.skipped,
            "failed": summary.failed
        }))),
        Err(e) => {
            tracing::error!("Error updating scores: {}", e);
            if let SyncError::Provider(ProviderError::Status { status, body }) = &e {
                tracing::error!("API Error Status: {}", status);
                tracing::error!("API Error Response: {}", body);
            }
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to update scores"
            })))
        }
    }
}

#[tracing::instrument(
    name = "Clear scores",
    skip(context),
    fields(sport = %context.config.sport)
)]
pub async fn clear_scores(context: web::Data<SportContext>) -> Result<HttpResponse> {
    let query_service = ScoreQueryService::new(context.store.clone());

    match query_service.clear().await {
        Ok(deleted) => {
            tracing::info!("Deleted {} {} games", deleted, context.config.sport);
            Ok(HttpResponse::Ok().json(json!({
                "message": format!("Deleted {} games", deleted)
            })))
        }
        Err(e) => {
            tracing::error!("Failed to clear scores: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to clear scores"
            })))
        }
    }
}
