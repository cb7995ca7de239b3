pub mod backend_health_handler;
pub mod scores_handler;
