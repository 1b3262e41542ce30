//! REST API routes.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::rate_limit::{self, RateLimiter};
use crate::api::{map, trips, vehicles};
use crate::config::Config;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    // Planning fans out to every external service; keep it behind a limiter
    let planning_limiter = RateLimiter::new(
        config.rate_limit_rps,
        config.rate_limit_enabled,
        config.trust_proxy,
    );

    let public_routes = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/vehicles", get(vehicles::list_vehicles))
        .route("/api/vehicle/:vehicle_id", get(vehicles::get_vehicle))
        .route("/api/charging-time", post(trips::charging_time))
        .route("/api/default-map", get(map::default_map));

    let planning_routes = Router::new()
        .route("/api/route", post(trips::plan_route))
        .layer(middleware::from_fn_with_state(
            planning_limiter,
            rate_limit::rate_limit,
        ));

    public_routes.merge(planning_routes)
}

async fn index() -> &'static str {
    "EV route planner API"
}

async fn health() -> &'static str {
    "OK"
}
