use actix_web::web;

pub mod backend_health;
pub mod scores;

use crate::services::SportContext;

pub fn init_routes(cfg: &mut web::ServiceConfig, sports: &[SportContext]) {
    cfg.service(backend_health::backend_health);

    // One scope per sport: /api/hockey, /api/basketball
    for context in sports {
        cfg.service(scores::sport_scope(context.clone()));
    }
}
