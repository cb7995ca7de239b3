use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::db::StoreError;
use crate::scores::{normalize_game, Normalization};
use crate::services::api_sports_client::{GameFeed, GameSelector, ProviderError};
use crate::services::sport_context::SportContext;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("All {failed} game upserts failed: {source}")]
    Store {
        failed: usize,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub fetched: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The provider had nothing for the requested date or season.
    NoGames,
    Synced(SyncSummary),
}

/// Pulls one sport's games from the provider and upserts them by matchup.
pub struct ScoreSyncService {
    context: SportContext,
    feed: Arc<dyn GameFeed>,
}

impl ScoreSyncService {
    pub fn new(context: SportContext, feed: Arc<dyn GameFeed>) -> Self {
        Self { context, feed }
    }

    /// Fetches games for `date`, or for the sport's default season when no
    /// date is given. A failing upsert is logged and counted; the rest of
    /// the batch still gets written.
    #[tracing::instrument(
        name = "Sync scores",
        skip(self),
        fields(sport = %self.context.config.sport)
    )]
    pub async fn sync(&self, date: Option<&str>) -> Result<SyncOutcome, SyncError> {
        let sport_config = &self.context.config;
        let selector = GameSelector::for_request(sport_config, date);

        let games = self.feed.fetch_games(sport_config, &selector).await?;

        if games.is_empty() {
            tracing::info!("No games found in provider response");
            return Ok(SyncOutcome::NoGames);
        }

        tracing::info!("Processing {} games", games.len());

        let mut summary = SyncSummary {
            fetched: games.len(),
            ..SyncSummary::default()
        };
        let mut last_error = None;

        for payload in &games {
            let game = match normalize_game(sport_config, payload) {
                Normalization::Ready(game) => game,
                Normalization::Skipped { reason } => {
                    tracing::info!("Skipping game - {}", reason);
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.context.store.upsert(&game, Utc::now()).await {
                Ok(record) => {
                    tracing::debug!(
                        "Saved game {}: {} {} - {} {} ({})",
                        record.id,
                        record.home_team,
                        record.home_score,
                        record.away_score,
                        record.away_team,
                        record.status
                    );
                    summary.updated += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to save {} vs {}: {}",
                        game.home_team,
                        game.away_team,
                        e
                    );
                    summary.failed += 1;
                    last_error = Some(e);
                }
            }
        }

        if summary.updated == 0 {
            if let Some(source) = last_error {
                return Err(SyncError::Store {
                    failed: summary.failed,
                    source,
                });
            }
        }

        tracing::info!(
            "Sync finished: {} updated, {} skipped, {} failed",
            summary.updated,
            summary.skipped,
            summary.failed
        );

        Ok(SyncOutcome::Synced(summary))
    }
}
