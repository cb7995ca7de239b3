pub mod api_sports_client;
pub mod score_query_service;
pub mod score_sync_service;
pub mod sport_context;

pub use api_sports_client::{ApiSportsClient, GameFeed, GameSelector, ProviderError};
pub use score_query_service::ScoreQueryService;
pub use score_sync_service::{ScoreSyncService, SyncError, SyncOutcome, SyncSummary};
pub use sport_context::SportContext;
