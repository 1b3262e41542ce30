//! Number of charging stops a trip needs.

use crate::rules::PlanningRules;

/// Charging stops needed to cover `total_distance_km`.
///
/// `ceil(distance / (autonomy * safety_margin))`, clamped to `[0, max_stops]`.
/// A vehicle without usable range (zero, negative or non-finite) gets 0 stops:
/// charging cannot be planned, which callers treat as a no-stop plan.
pub fn required_stops(
    total_distance_km: f64,
    autonomy_km: f64,
    safety_margin: f64,
    max_stops: usize,
) -> usize {
    if !autonomy_km.is_finite() || autonomy_km <= 0.0 {
        return 0;
    }
    let usable_range_km = autonomy_km * safety_margin;
    if !usable_range_km.is_finite() || usable_range_km <= 0.0 {
        return 0;
    }
    if total_distance_km.is_nan() || total_distance_km <= 0.0 {
        return 0;
    }

    let stops = (total_distance_km / usable_range_km).ceil();
    if stops >= max_stops as f64 {
        max_stops
    } else {
        stops as usize
    }
}

/// [`required_stops`] with the thresholds from `rules`.
pub fn required_stops_with_rules(
    total_distance_km: f64,
    autonomy_km: f64,
    rules: &PlanningRules,
) -> usize {
    required_stops(
        total_distance_km,
        autonomy_km,
        rules.safety_margin,
        rules.max_stops,
    )
}
