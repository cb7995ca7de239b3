use chrono::{DateTime, Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;

use scoreboard_backend::run;
use scoreboard_backend::config::settings::{get_config, DatabaseSettings};
use scoreboard_backend::config::sports::{Sport, SportConfig};
use scoreboard_backend::db::{MemoryScoreStore, ScoreStore};
use scoreboard_backend::db::pg_score_store::run_migrations;
use scoreboard_backend::models::game::NormalizedGame;
use scoreboard_backend::services::{ApiSportsClient, SportContext};
use scoreboard_backend::telemetry::{get_subscriber, init_subscriber};

use super::failing_store::FailingScoreStore;
use super::provider_stub::ProviderStub;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestApp {
    pub address: String,
    pub provider: ProviderStub,
    pub hockey_store: Arc<MemoryScoreStore>,
    pub basketball_store: Arc<MemoryScoreStore>,
}

impl TestApp {
    pub fn store(&self, sport: Sport) -> Arc<MemoryScoreStore> {
        match sport {
            Sport::Hockey => self.hockey_store.clone(),
            Sport::Basketball => self.basketball_store.clone(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// A running server whose stores fail every call.
pub struct FailingTestApp {
    pub address: String,
    pub provider: ProviderStub,
}

impl FailingTestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Starts the server on a random port, backed by the given stores and a
/// fresh provider stub. Returns the server address and the stub.
async fn launch(
    hockey_store: Arc<dyn ScoreStore>,
    basketball_store: Arc<dyn ScoreStore>,
) -> (String, ProviderStub) {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let provider = ProviderStub::start();

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let sports = vec![
        SportContext::new(
            SportConfig::new(Sport::Hockey, provider.base_url("hockey")),
            hockey_store,
        ),
        SportContext::new(
            SportConfig::new(Sport::Basketball, provider.base_url("basketball")),
            basketball_store,
        ),
    ];

    let feed = ApiSportsClient::new(SecretString::new(TEST_API_KEY.into()), None)
        .expect("Failed to build provider client");

    let server = run(listener, sports, Arc::new(feed))
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    (address, provider)
}

pub async fn spawn_app() -> TestApp {
    let hockey_store = Arc::new(MemoryScoreStore::new());
    let basketball_store = Arc::new(MemoryScoreStore::new());

    let (address, provider) = launch(
        hockey_store.clone() as Arc<dyn ScoreStore>,
        basketball_store.clone() as Arc<dyn ScoreStore>,
    )
    .await;

    TestApp {
        address,
        provider,
        hockey_store,
        basketball_store,
    }
}

pub async fn spawn_app_with_failing_store() -> FailingTestApp {
    let (address, provider) = launch(
        Arc::new(FailingScoreStore),
        Arc::new(FailingScoreStore),
    )
    .await;

    FailingTestApp { address, provider }
}

/// Fresh database with migrations applied, named after a random UUID.
pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    run_migrations(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Pool on a throwaway database built from the `configuration/` settings.
pub async fn test_db_pool() -> PgPool {
    Lazy::force(&TRACING);

    let mut configuration = get_config().expect("Failed to read configuration.");
    // A full DATABASE_URL would bypass the per-test database name
    configuration.database.db_url = None;
    configuration.database.db_name = Uuid::new_v4().to_string();
    configure_db(&configuration.database).await
}

/// Server-local wall clock time as a UTC instant.
pub fn local_time(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .earliest()
        .expect("Invalid local time")
        .with_timezone(&Utc)
}

pub fn stored_game(sport: Sport, home: &str, away: &str, start_time: Option<DateTime<Utc>>) -> NormalizedGame {
    NormalizedGame {
        sport: sport.as_str().to_string(),
        league: sport.default_league_name().to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: 2,
        away_score: 1,
        status: "Game Finished".to_string(),
        start_time,
    }
}

pub async fn seed(app: &TestApp, sport: Sport, games: Vec<NormalizedGame>) {
    let store = app.store(sport);
    for game in games {
        store
            .upsert(&game, Utc::now())
            .await
            .expect("Failed to seed game");
    }
}
