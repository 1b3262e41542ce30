//! Trip planning endpoints.

use axum::{extract::State, Json};
use evroute_core::{ChargingTimeRequest, ChargingTimeResponse, TripPlanResponse, TripRequest};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::planner::{estimate_charging, plan_trip};
use crate::state::AppState;

/// POST /api/route
///
/// A missing or malformed body is treated like one with no fields.
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<TripRequest>>,
) -> Result<Json<TripPlanResponse>, ApiError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let plan = plan_trip(&state, &request).await?;
    Ok(Json(plan))
}

/// POST /api/charging-time
pub async fn charging_time(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<ChargingTimeRequest>>,
) -> Result<Json<ChargingTimeResponse>, ApiError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let estimate = estimate_charging(&state, &request).await?;
    Ok(Json(estimate))
}
