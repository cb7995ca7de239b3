pub mod memory_score_store;
pub mod pg_score_store;
pub mod score_store;

pub use memory_score_store::MemoryScoreStore;
pub use pg_score_store::PgScoreStore;
pub use score_store::{GameFilter, ScoreStore, SortOrder, StoreError};
