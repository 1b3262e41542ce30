//! Validation errors raised when building core values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("route must contain at least one point")]
    EmptyRoute,

    #[error("invalid coordinate (lon {lon}, lat {lat})")]
    InvalidCoordinate { lon: f64, lat: f64 },

    #[error("invalid vehicle profile: {0}")]
    InvalidVehicleProfile(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
