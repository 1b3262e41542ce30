//! API routes for the EV route planner.

pub mod error;
pub mod map;
pub mod rate_limit;
pub mod request_id;
mod routes;
pub mod trips;
pub mod vehicles;

use crate::config::Config;
use axum::Router;

pub fn routes(config: &Config) -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router(config)
}
