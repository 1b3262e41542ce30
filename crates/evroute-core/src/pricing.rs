//! Trip duration and price estimation.

use serde::{Deserialize, Serialize};

/// Assumed average driving speed.
pub const AVERAGE_SPEED_KMH: f64 = 90.0;
/// Flat price charged per hour of trip.
pub const PRICE_PER_HOUR: f64 = 2.0;
const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    /// Driving plus recharging time
    pub hours: f64,
    pub price: f64,
}

impl TripEstimate {
    /// Both figures rounded to cents / hundredths of an hour.
    pub fn rounded(self) -> Self {
        Self {
            hours: round2(self.hours),
            price: round2(self.price),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Produces a duration and price for a trip.
pub trait TripEstimator: Send + Sync {
    fn estimate(
        &self,
        distance_km: f64,
        autonomy_km: f64,
        recharge_rate_kwh: f64,
    ) -> Option<TripEstimate>;
}

/// Linear time and price model.
///
/// Recharges are counted fractionally (`distance / autonomy`), each one
/// costing `recharge_rate_kwh / 60` hours. No demand pricing, charger speed
/// or queueing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTripEstimator {
    pub average_speed_kmh: f64,
    pub price_per_hour: f64,
}

impl Default for LinearTripEstimator {
    fn default() -> Self {
        Self {
            average_speed_kmh: AVERAGE_SPEED_KMH,
            price_per_hour: PRICE_PER_HOUR,
        }
    }
}

impl TripEstimator for LinearTripEstimator {
    fn estimate(
        &self,
        distance_km: f64,
        autonomy_km: f64,
        recharge_rate_kwh: f64,
    ) -> Option<TripEstimate> {
        let inputs_finite =
            distance_km.is_finite() && autonomy_km.is_finite() && recharge_rate_kwh.is_finite();
        if !inputs_finite || distance_km <= 0.0 || autonomy_km <= 0.0 {
            return None;
        }
        if self.average_speed_kmh <= 0.0 {
            return None;
        }

        let recharges = distance_km / autonomy_km;
        let recharge_hours = recharges * (recharge_rate_kwh / MINUTES_PER_HOUR);
        let driving_hours = distance_km / self.average_speed_kmh;
        let hours = driving_hours + recharge_hours;

        Some(TripEstimate {
            hours,
            price: hours * self.price_per_hour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_combines_driving_and_recharge_time() {
        let estimate = LinearTripEstimator::default()
            .estimate(450.0, 300.0, 60.0)
            .unwrap();
        // 450/90 = 5h driving, 1.5 recharges * 1h = 1.5h
        assert!((estimate.hours - 6.5).abs() < 1e-9);
        assert!((estimate.price - 13.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_have_no_estimate() {
        let estimator = LinearTripEstimator::default();
        assert!(estimator.estimate(0.0, 300.0, 60.0).is_none());
        assert!(estimator.estimate(100.0, 0.0, 60.0).is_none());
        assert!(estimator.estimate(f64::NAN, 300.0, 60.0).is_none());
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        let estimate = TripEstimate {
            hours: 3.14159,
            price: 6.28318,
        }
        .rounded();
        assert_eq!(estimate.hours, 3.14);
        assert_eq!(estimate.price, 6.28);
    }
}
