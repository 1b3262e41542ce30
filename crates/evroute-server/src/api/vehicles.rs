//! Vehicle catalog endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use evroute_core::{Lookup, VehicleDetailsResponse, VehicleListResponse};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;

/// GET /api/vehicles
///
/// An unreachable catalog yields an empty list so the vehicle picker still renders.
pub async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<VehicleListResponse> {
    let vehicles = state.vehicles().list_vehicles().await.found().unwrap_or_default();
    Json(VehicleListResponse { vehicles })
}

/// GET /api/vehicle/:vehicle_id
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<VehicleDetailsResponse>, ApiError> {
    match state.vehicle_details(&vehicle_id).await {
        Lookup::Found(vehicle_details) => Ok(Json(VehicleDetailsResponse {
            optimal_charging_time: vehicle_details.profile.optimal_charging_time(),
            vehicle_details,
        })),
        Lookup::NotFound => Err(ApiError::not_found(format!(
            "Unknown vehicle '{}'",
            vehicle_id
        ))),
        Lookup::Unavailable(reason) => Err(ApiError::bad_gateway(format!(
            "vehicle catalog unavailable: {}",
            reason
        ))),
    }
}
