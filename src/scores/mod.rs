pub mod date_range;
pub mod normalizer;

pub use date_range::TimeRange;
pub use normalizer::{normalize_game, Normalization};
