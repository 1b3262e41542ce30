//! Core data models for the EV route planner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A geographic position in decimal degrees, longitude first.
///
/// Routing providers emit `[lon, lat]` pairs and the whole core keeps that
/// order. Display code that wants `[lat, lon]` goes through [`GeoPoint::lat_lon`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn try_new(lon: f64, lat: f64) -> CoreResult<Self> {
        let point = Self { lon, lat };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(CoreError::InvalidCoordinate { lon, lat })
        }
    }

    /// Build a point from a routing-provider `[lon, lat]` pair.
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lon: pair[0],
            lat: pair[1],
        }
    }

    /// `[lat, lon]` ordering for map widgets.
    pub const fn lat_lon(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Ordered polyline returned by the routing provider for one planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GeoPoint>", into = "Vec<GeoPoint>")]
pub struct Route {
    points: Vec<GeoPoint>,
}

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> CoreResult<Self> {
        if points.is_empty() {
            return Err(CoreError::EmptyRoute);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed route; kept for slice parity.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.points.last()
    }
}

impl TryFrom<Vec<GeoPoint>> for Route {
    type Error = CoreError;

    fn try_from(points: Vec<GeoPoint>) -> Result<Self, Self::Error> {
        Route::new(points)
    }
}

impl From<Route> for Vec<GeoPoint> {
    fn from(route: Route) -> Self {
        route.points
    }
}

/// Charging connector exposed by a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub standard: String,
    /// Minutes needed for a full charge on this connector
    pub time: f64,
}

/// Energy-related figures for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Best-case range in kilometers
    pub autonomy_km: f64,
    /// Usable battery capacity in kWh
    pub recharge_rate_kwh: f64,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl VehicleProfile {
    /// Build a profile. Zero autonomy is accepted (it plans no stops);
    /// negative or non-finite figures are not.
    pub fn new(
        autonomy_km: f64,
        recharge_rate_kwh: f64,
        connectors: Vec<Connector>,
    ) -> CoreResult<Self> {
        if !autonomy_km.is_finite() || autonomy_km < 0.0 {
            return Err(CoreError::InvalidVehicleProfile(format!(
                "autonomy must be a non-negative number, got {}",
                autonomy_km
            )));
        }
        if !recharge_rate_kwh.is_finite() || recharge_rate_kwh < 0.0 {
            return Err(CoreError::InvalidVehicleProfile(format!(
                "usable battery capacity must be a non-negative number, got {}",
                recharge_rate_kwh
            )));
        }
        Ok(Self {
            autonomy_km,
            recharge_rate_kwh,
            connectors,
        })
    }

    /// Fastest full-charge time across connectors, for display.
    pub fn optimal_charging_time(&self) -> Option<f64> {
        self.connectors
            .iter()
            .map(|connector| connector.time)
            .filter(|time| time.is_finite())
            .reduce(f64::min)
    }
}

/// One entry of the vehicle catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub id: String,
    pub make: String,
    pub model: String,
}

/// Everything the presentation layer shows about a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub id: String,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub profile: VehicleProfile,
}

/// A real-world charging station returned by the station resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStation {
    pub position: GeoPoint,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Result of planning charging stops along one route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingPlan {
    pub route: Route,
    /// Stops in travel order, deduplicated by proximity
    pub stops: Vec<ChargingStation>,
    pub total_distance_km: f64,
    pub required_stops: usize,
    /// Segment indexes that were searched but yielded no usable station
    #[serde(default)]
    pub segments_without_stop: Vec<usize>,
    /// Candidate lookups that failed because the station source was unreachable
    #[serde(default)]
    pub unavailable_lookups: usize,
}

impl ChargingPlan {
    /// True when fewer stops were found than the route needs.
    pub fn is_degraded(&self) -> bool {
        self.stops.len() < self.required_stops
    }
}

// ========== API PAYLOADS ==========

/// Request body for `POST /api/route`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    /// Vehicle catalog id
    #[serde(default)]
    pub vehicle: Option<String>,
}

/// A named place in `lat`/`lon` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

impl NamedPoint {
    pub fn new(point: GeoPoint, name: impl Into<String>) -> Self {
        Self {
            lat: point.lat,
            lon: point.lon,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationView {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl From<&ChargingStation> for StationView {
    fn from(station: &ChargingStation) -> Self {
        Self {
            lat: station.position.lat,
            lon: station.position.lon,
            name: station.name.clone(),
            address: station.address.clone().unwrap_or_default(),
        }
    }
}

/// Initial viewport for a map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
}

impl MapView {
    pub const DEFAULT_ZOOM: u8 = 6;

    /// Viewport centered on metropolitan France.
    pub fn default_view() -> Self {
        Self {
            center: [46.603354, 1.888334],
            zoom: Self::DEFAULT_ZOOM,
        }
    }

    /// Viewport centered halfway between two places.
    pub fn between(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            center: [(a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0],
            zoom: Self::DEFAULT_ZOOM,
        }
    }
}

/// Response body for `POST /api/route`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlanResponse {
    /// Route polyline as `[lat, lon]` pairs
    pub route: Vec<[f64; 2]>,
    pub stations: Vec<StationView>,
    #[serde(rename = "startPoint")]
    pub start_point: NamedPoint,
    #[serde(rename = "endPoint")]
    pub end_point: NamedPoint,
    pub map: MapView,
    /// Kilometers
    pub distance: f64,
    /// Hours
    pub time: Option<f64>,
    pub price: Option<f64>,
    pub nb_stations: usize,
    pub required_stops: usize,
    /// Fewer stations were found than the route needs
    pub degraded: bool,
    pub unavailable_lookups: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<VehicleSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDetailsResponse {
    pub vehicle_details: VehicleDetails,
    /// Minutes
    pub optimal_charging_time: Option<f64>,
}

/// Request body for `POST /api/charging-time`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargingTimeRequest {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub vehicle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingTimeResponse {
    /// Hours
    pub charging_time: Option<f64>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultMapResponse {
    pub map: MapView,
}
