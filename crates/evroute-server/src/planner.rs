//! Trip planning orchestration.
//!
//! Resolves the vehicle, both endpoints and the route polyline through the
//! collaborators, hands the route to the core stop planner and dresses the
//! result up for the API. Every collaborator call is awaited in turn.

use chrono::Utc;
use evroute_core::{
    plan_charging, ChargingTimeRequest, ChargingTimeResponse, GeoPoint, Lookup, MapView,
    NamedPoint, StationView, TripEstimate, TripPlanResponse, TripRequest, VehicleDetails,
};
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Missing parameters: {0}")]
    MissingParameters(&'static str),

    #[error("Could not locate '{0}'")]
    PlaceNotFound(String),

    #[error("Unknown vehicle '{0}'")]
    VehicleNotFound(String),

    #[error("No route between '{start}' and '{end}'")]
    NoRoute { start: String, end: String },

    #[error("{service} unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },
}

impl PlanError {
    fn unavailable(service: &'static str, reason: String) -> Self {
        PlanError::Unavailable { service, reason }
    }
}

/// A trimmed, non-empty request field.
fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, PlanError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(PlanError::MissingParameters(name))
}

fn resolve<T>(
    lookup: Lookup<T>,
    service: &'static str,
    missing: impl FnOnce() -> PlanError,
) -> Result<T, PlanError> {
    match lookup {
        Lookup::Found(value) => Ok(value),
        Lookup::NotFound => Err(missing()),
        Lookup::Unavailable(reason) => Err(PlanError::unavailable(service, reason)),
    }
}

async fn load_vehicle(state: &AppState, vehicle_id: &str) -> Result<VehicleDetails, PlanError> {
    resolve(
        state.vehicle_details(vehicle_id).await,
        "vehicle catalog",
        || PlanError::VehicleNotFound(vehicle_id.to_string()),
    )
}

async fn locate(state: &AppState, place: &str) -> Result<GeoPoint, PlanError> {
    resolve(state.geocoder().geocode(place).await, "geocoder", || {
        PlanError::PlaceNotFound(place.to_string())
    })
}

/// Plan a trip with charging stops for `POST /api/route`.
pub async fn plan_trip(
    state: &AppState,
    request: &TripRequest,
) -> Result<TripPlanResponse, PlanError> {
    let start = required(&request.start, "start")?;
    let end = required(&request.end, "end")?;
    let vehicle_id = required(&request.vehicle, "vehicle")?;

    let vehicle = load_vehicle(state, vehicle_id).await?;
    let profile = &vehicle.profile;

    let start_position = locate(state, start).await?;
    let end_position = locate(state, end).await?;

    let route = resolve(
        state.routes().route_polyline(start_position, end_position).await,
        "routing provider",
        || PlanError::NoRoute {
            start: start.to_string(),
            end: end.to_string(),
        },
    )?;

    let plan = plan_charging(route, profile.autonomy_km, state.stations(), state.rules()).await;

    for segment in &plan.segments_without_stop {
        tracing::debug!(segment, "No usable charging station in segment");
    }
    if plan.is_degraded() {
        tracing::info!(
            required = plan.required_stops,
            found = plan.stops.len(),
            unavailable_lookups = plan.unavailable_lookups,
            "Degraded charging coverage"
        );
    }

    let estimate = state
        .estimator()
        .estimate(
            plan.total_distance_km,
            profile.autonomy_km,
            profile.recharge_rate_kwh,
        )
        .map(TripEstimate::rounded);

    tracing::info!(
        start,
        end,
        vehicle_id,
        distance_km = plan.total_distance_km,
        stops = plan.stops.len(),
        "Trip planned"
    );

    Ok(TripPlanResponse {
        route: plan.route.points().iter().map(GeoPoint::lat_lon).collect(),
        stations: plan.stops.iter().map(StationView::from).collect(),
        start_point: NamedPoint::new(start_position, start),
        end_point: NamedPoint::new(end_position, end),
        map: MapView::between(start_position, end_position),
        distance: plan.total_distance_km,
        time: estimate.map(|e| e.hours),
        price: estimate.map(|e| e.price),
        nb_stations: plan.stops.len(),
        required_stops: plan.required_stops,
        degraded: plan.is_degraded(),
        unavailable_lookups: plan.unavailable_lookups,
        generated_at: Utc::now(),
    })
}

/// Trip duration and price for `POST /api/charging-time`.
///
/// Degenerate distances or vehicle figures yield null fields, not an error.
pub async fn estimate_charging(
    state: &AppState,
    request: &ChargingTimeRequest,
) -> Result<ChargingTimeResponse, PlanError> {
    let distance = request
        .distance
        .filter(|d| *d != 0.0)
        .ok_or(PlanError::MissingParameters("distance"))?;
    let vehicle_id = required(&request.vehicle, "vehicle")?;

    let vehicle = load_vehicle(state, vehicle_id).await?;
    let estimate = state
        .estimator()
        .estimate(
            distance,
            vehicle.profile.autonomy_km,
            vehicle.profile.recharge_rate_kwh,
        )
        .map(TripEstimate::rounded);

    Ok(ChargingTimeResponse {
        charging_time: estimate.map(|e| e.hours),
        price: estimate.map(|e| e.price),
    })
}
