use std::env;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};

use crate::config::sports::{Sport, SportConfig};

#[derive(serde::Deserialize, Debug)]
pub struct Settings{
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub provider: ProviderSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings{
    pub user: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub db_url: Option<SecretString>
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> SecretString {
        match &self.db_url {
            Some(db_url) => db_url.clone(),
            None => {
                SecretString::new(format!(
                    "postgres://{}:{}@{}:{}/{}",
                    self.user, self.password.expose_secret(), self.host, self.port, self.db_name
                ).into_boxed_str())
            }
        }
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.user, self.password.expose_secret(), self.host, self.port
        )
    }
}

#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings{
    pub port: u16,
    pub host: String,
    pub log_level: String,
    #[serde(default = "default_store")]
    pub store: StoreBackend,
}

fn default_store() -> StoreBackend {
    StoreBackend::Postgres
}

#[derive(serde::Deserialize, Debug)]
pub struct ProviderSettings {
    pub api_key: SecretString,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    pub hockey: SportProviderSettings,
    pub basketball: SportProviderSettings,
}

/// Per-sport provider overrides; anything left out falls back to the sport's defaults.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct SportProviderSettings {
    pub base_url: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub league_id: Option<u32>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub league_name: Option<String>,
}

impl SportProviderSettings {
    pub fn to_sport_config(&self, sport: Sport) -> SportConfig {
        let mut sport_config = SportConfig::new(sport, self.base_url.clone());
        if let Some(host) = &self.host {
            sport_config.provider_host = host.clone();
        }
        if let Some(league_id) = self.league_id {
            sport_config.league_id = league_id;
        }
        if let Some(season) = &self.season {
            sport_config.season_default = season.clone();
        }
        if let Some(league_name) = &self.league_name {
            sport_config.default_league_name = league_name.clone();
        }
        sport_config
    }
}

impl ProviderSettings {
    pub fn sport_configs(&self) -> Vec<SportConfig> {
        Sport::all()
            .into_iter()
            .map(|sport| match sport {
                Sport::Hockey => self.hockey.to_sport_config(sport),
                Sport::Basketball => self.basketball.to_sport_config(sport),
            })
            .collect()
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    // Hosted Postgres exposes the full connection string directly
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(SecretString::new(db_url.into_boxed_str()));
    }

    if let Ok(api_key) = env::var("SPORTS_API_KEY") {
        settings.provider.api_key = SecretString::new(api_key.into_boxed_str());
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
