use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::score_store::{GameFilter, ScoreStore, SortOrder, StoreError};
use crate::models::game::{GameRecord, NormalizedGame};

/// Process-local store for running without Postgres.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    records: RwLock<Vec<GameRecord>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn compare_start_times(a: &GameRecord, b: &GameRecord, order: SortOrder) -> Ordering {
    match (a.start_time, b.start_time) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn upsert(
        &self,
        game: &NormalizedGame,
        last_updated: DateTime<Utc>,
    ) -> Result<GameRecord, StoreError> {
        let mut records = self.records.write().await;

        let existing = records
            .iter_mut()
            .find(|record| record.matches_key(&game.sport, &game.home_team, &game.away_team));

        let record = match existing {
            Some(record) => {
                *record = game.clone().into_record(record.id, last_updated);
                record.clone()
            }
            None => {
                let record = game.clone().into_record(Uuid::new_v4(), last_updated);
                records.push(record.clone());
                record
            }
        };

        Ok(record)
    }

    async fn find(
        &self,
        filter: &GameFilter,
        order: SortOrder,
    ) -> Result<Vec<GameRecord>, StoreError> {
        let records = self.records.read().await;
        let mut found: Vec<GameRecord> = records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        found.sort_by(|a, b| compare_start_times(a, b, order));
        Ok(found)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let deleted = records.len() as u64;
        records.clear();
        Ok(deleted)
    }
}
