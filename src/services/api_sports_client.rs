use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

use crate::config::sports::SportConfig;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Provider response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Provider rejected the request: {0}")]
    Rejected(String),
}

/// Which slice of games to ask the provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSelector {
    /// A single calendar day, `YYYY-MM-DD`.
    Date(String),
    /// A whole season, in the sport's own season format.
    Season(String),
}

impl GameSelector {
    /// An explicit date wins; otherwise the sport's default season.
    pub fn for_request(sport_config: &SportConfig, date: Option<&str>) -> Self {
        match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(date) => GameSelector::Date(date.to_string()),
            None => GameSelector::Season(sport_config.season_default.clone()),
        }
    }

    fn query_param(&self) -> (&'static str, &str) {
        match self {
            GameSelector::Date(date) => ("date", date.as_str()),
            GameSelector::Season(season) => ("season", season.as_str()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiSportsEnvelope {
    #[serde(default)]
    errors: Value,
    #[serde(default)]
    response: Option<Vec<Value>>,
}

impl ApiSportsEnvelope {
    /// The provider reports key and quota problems with a 200 and a
    /// non-empty `errors` object or array.
    fn rejection(&self) -> Option<String> {
        let has_errors = match &self.errors {
            Value::Object(errors) => !errors.is_empty(),
            Value::Array(errors) => !errors.is_empty(),
            Value::String(error) => !error.is_empty(),
            _ => false,
        };
        has_errors.then(|| self.errors.to_string())
    }
}

/// Source of raw provider game payloads.
#[async_trait]
pub trait GameFeed: Send + Sync {
    async fn fetch_games(
        &self,
        sport_config: &SportConfig,
        selector: &GameSelector,
    ) -> Result<Vec<Value>, ProviderError>;
}

pub struct ApiSportsClient {
    api_key: SecretString,
    client: Client,
}

impl ApiSportsClient {
    pub fn new(api_key: SecretString, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            api_key,
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl GameFeed for ApiSportsClient {
    async fn fetch_games(
        &self,
        sport_config: &SportConfig,
        selector: &GameSelector,
    ) -> Result<Vec<Value>, ProviderError> {
        let url = sport_config.games_endpoint();
        let league_id = sport_config.league_id.to_string();
        let (selector_key, selector_value) = selector.query_param();

        tracing::info!("Requesting {} games from {} ({}={})",
            sport_config.sport, url, selector_key, selector_value);

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", self.api_key.expose_secret())
            .header("x-rapidapi-host", &sport_config.provider_host)
            .query(&[("league", league_id.as_str()), (selector_key, selector_value)])
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        tracing::debug!("Provider responded with status {}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status { status, body });
        }

        let envelope = response
            .json::<ApiSportsEnvelope>()
            .await
            .map_err(ProviderError::Decode)?;

        if let Some(rejection) = envelope.rejection() {
            return Err(ProviderError::Rejected(rejection));
        }

        Ok(envelope.response.unwrap_or_default())
    }
}
