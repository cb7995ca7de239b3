use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use scoreboard_backend::run;
use scoreboard_backend::config::settings::{get_config, StoreBackend};
use scoreboard_backend::db::{MemoryScoreStore, PgScoreStore, ScoreStore};
use scoreboard_backend::db::pg_score_store::run_migrations;
use scoreboard_backend::services::{ApiSportsClient, SportContext};
use scoreboard_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "scoreboard-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let sport_configs = config.provider.sport_configs();

    let sports: Vec<SportContext> = match config.application.store {
        StoreBackend::Postgres => {
            // Only try to establish connection when actually used
            let connection_pool = PgPoolOptions::new()
                .max_connections(16)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect_lazy(
                    config.database.connection_string().expose_secret()
                )
                .expect("Failed to create Postgres connection pool");

            match run_migrations(&connection_pool).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!(
                    "Database unavailable ({}). Server will continue without a working store.", e
                ),
            }

            sport_configs
                .into_iter()
                .map(|sport_config| {
                    let store: Arc<dyn ScoreStore> =
                        Arc::new(PgScoreStore::new(connection_pool.clone(), sport_config.sport));
                    SportContext::new(sport_config, store)
                })
                .collect()
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, games are lost on restart");
            sport_configs
                .into_iter()
                .map(|sport_config| {
                    let store: Arc<dyn ScoreStore> = Arc::new(MemoryScoreStore::new());
                    SportContext::new(sport_config, store)
                })
                .collect()
        }
    };

    let feed = ApiSportsClient::new(
        config.provider.api_key.clone(),
        config.provider.request_timeout_secs.map(Duration::from_secs),
    )
    .map_err(std::io::Error::other)?;

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("App running on {}", address);

    run(listener, sports, Arc::new(feed))?.await
}
