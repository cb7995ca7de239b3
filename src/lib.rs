use actix_web::{middleware, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod db;
pub mod scores;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::services::{GameFeed, SportContext};

pub fn run(
    listener: TcpListener,
    sports: Vec<SportContext>,
    feed: Arc<dyn GameFeed>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let feed_data: web::Data<dyn GameFeed> = web::Data::from(feed);

    let server = HttpServer::new( move || {
        // The browser client is served from its own origin
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allow_any_header()
            .max_age(3600);

        let sports = sports.clone();
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(feed_data.clone())
            .configure(move |cfg| init_routes(cfg, &sports))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
