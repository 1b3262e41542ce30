//! EV route planner server: REST API over the charging-stop planner.

pub mod api;
pub mod cache;
pub mod config;
pub mod planner;
pub mod state;

use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::AppState;

/// Full application: API routes, state and the shared middleware stack.
pub fn app(config: &Config, state: Arc<AppState>) -> Router {
    api::routes(config).with_state(state).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(api::request_id::ensure_request_id))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
