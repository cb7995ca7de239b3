use std::sync::Arc;

use crate::db::{GameFilter, ScoreStore, SortOrder, StoreError};
use crate::models::game::GameRecord;
use crate::scores::date_range::{day_range, month_range};

/// Read and reset operations over one sport's store.
pub struct ScoreQueryService {
    store: Arc<dyn ScoreStore>,
}

fn sport_filter(sport: Option<&str>) -> Option<String> {
    sport
        .map(str::trim)
        .filter(|sport| !sport.is_empty())
        .map(str::to_string)
}

impl ScoreQueryService {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Games for the monthly view, newest first. The month window only
    /// applies when both `month` and `year` are usable.
    pub async fn list_all(
        &self,
        sport: Option<&str>,
        month: Option<&str>,
        year: Option<&str>,
    ) -> Result<Vec<GameRecord>, StoreError> {
        let start_time = match (month, year) {
            (Some(month), Some(year)) => {
                let range = month_range(month, year);
                if range.is_none() {
                    tracing::debug!("Ignoring unusable month filter {}/{}", month, year);
                }
                range
            }
            _ => None,
        };

        let filter = GameFilter {
            sport: sport_filter(sport),
            start_time,
        };
        self.store.find(&filter, SortOrder::Descending).await
    }

    /// Games of a single server-local day, earliest first. A missing or
    /// incomplete date returns everything.
    pub async fn list_by_date(
        &self,
        sport: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<GameRecord>, StoreError> {
        let start_time = date.and_then(|date| {
            let range = day_range(date);
            match &range {
                Some(range) => tracing::debug!("Date filter {}: {} - {}", date, range.start, range.end),
                None => tracing::debug!("Ignoring unusable date filter {}", date),
            }
            range
        });

        let filter = GameFilter {
            sport: sport_filter(sport),
            start_time,
        };
        self.store.find(&filter, SortOrder::Ascending).await
    }

    pub async fn clear(&self) -> Result<u64, StoreError> {
        self.store.delete_all().await
    }
}
