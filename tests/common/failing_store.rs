use async_trait::async_trait;
use chrono::{DateTime, Utc};

use scoreboard_backend::db::{GameFilter, ScoreStore, SortOrder, StoreError};
use scoreboard_backend::models::game::{GameRecord, NormalizedGame};

/// Store whose every operation fails like an unreachable database.
pub struct FailingScoreStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ScoreStore for FailingScoreStore {
    async fn upsert(
        &self,
        _game: &NormalizedGame,
        _last_updated: DateTime<Utc>,
    ) -> Result<GameRecord, StoreError> {
        Err(unavailable())
    }

    async fn find(
        &self,
        _filter: &GameFilter,
        _order: SortOrder,
    ) -> Result<Vec<GameRecord>, StoreError> {
        Err(unavailable())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        Err(unavailable())
    }
}
