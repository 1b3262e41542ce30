//! Interfaces to the external services a planning request depends on.
//!
//! The core only sees these traits. Concrete HTTP clients live in
//! `evroute-providers`; tests plug in in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{ChargingStation, GeoPoint, Route, VehicleDetails, VehicleSummary};

/// Outcome of a call to an external collaborator.
///
/// Keeps "the service answered with nothing" apart from "the service could
/// not be reached", so callers can degrade the first silently and report
/// the second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Unavailable(String),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Lookup::Unavailable(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Unavailable(reason) => Lookup::Unavailable(reason),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

pub type StationLookup = Lookup<ChargingStation>;

/// Finds the charging station nearest to a point.
#[async_trait]
pub trait StationResolver: Send + Sync {
    /// Look for a station inside the box `point ± search_radius_deg`.
    async fn find_nearest_station(&self, point: GeoPoint, search_radius_deg: f64)
        -> StationLookup;
}

/// Resolves a free-form place name to a position.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Lookup<GeoPoint>;
}

/// Supplies a driving polyline between two positions.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn route_polyline(&self, start: GeoPoint, end: GeoPoint) -> Lookup<Route>;
}

/// Vehicle catalog with energy figures.
#[async_trait]
pub trait VehicleCatalog: Send + Sync {
    async fn list_vehicles(&self) -> Lookup<Vec<VehicleSummary>>;

    async fn vehicle_details(&self, vehicle_id: &str) -> Lookup<VehicleDetails>;
}
