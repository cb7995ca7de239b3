use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::game::{GameRecord, NormalizedGame};
use crate::scores::TimeRange;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Conditions a stored game must satisfy; `None` means unrestricted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    pub sport: Option<String>,
    pub start_time: Option<TimeRange>,
}

impl GameFilter {
    pub fn matches(&self, record: &GameRecord) -> bool {
        if let Some(sport) = &self.sport {
            if &record.sport != sport {
                return false;
            }
        }
        match (&self.start_time, record.start_time) {
            (Some(range), Some(start_time)) => range.contains(start_time),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

/// Persistence for one sport's games. Implementations keep at most one
/// record per (sport, home team, away team).
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Inserts the game, or overwrites every field of the existing record
    /// for the same matchup. `last_updated` is stamped on both paths.
    async fn upsert(
        &self,
        game: &NormalizedGame,
        last_updated: DateTime<Utc>,
    ) -> Result<GameRecord, StoreError>;

    /// Games matching `filter`, sorted by start time. Games without a start
    /// time come last in either order.
    async fn find(
        &self,
        filter: &GameFilter,
        order: SortOrder,
    ) -> Result<Vec<GameRecord>, StoreError>;

    /// Removes every game in the collection and returns how many went.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}
