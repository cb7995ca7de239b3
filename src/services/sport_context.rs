use std::sync::Arc;

use crate::config::sports::SportConfig;
use crate::db::ScoreStore;

/// A sport's configuration together with the store that owns its games.
/// Each `/api/<sport>` scope carries one of these.
#[derive(Clone)]
pub struct SportContext {
    pub config: SportConfig,
    pub store: Arc<dyn ScoreStore>,
}

impl SportContext {
    pub fn new(config: SportConfig, store: Arc<dyn ScoreStore>) -> Self {
        Self { config, store }
    }

    pub fn scope_path(&self) -> String {
        format!("/api/{}", self.config.sport.as_str())
    }
}
