//! Flat-earth distance approximation over a route polyline.
//!
//! Each leg is the Euclidean length of the `(lon, lat)` delta scaled by a
//! fixed degrees-to-kilometers factor. This is not geodesically exact and
//! overestimates east-west legs away from the equator; callers depend on
//! these exact figures, so it must not be swapped for haversine.

use crate::models::GeoPoint;

/// Kilometers per degree used by the approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Approximate length of a single leg in kilometers.
pub fn leg_distance_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let dlon = to.lon - from.lon;
    let dlat = to.lat - from.lat;
    (dlon * dlon + dlat * dlat).sqrt() * KM_PER_DEGREE
}

/// Approximate driven distance along `points` in kilometers.
///
/// Empty and single-point inputs measure 0.
pub fn route_distance_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| leg_distance_km(&pair[0], &pair[1]))
        .sum()
}
