//! Tunable thresholds for charging-stop planning.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SAFETY_MARGIN: f64 = 0.8;
pub const DEFAULT_MAX_STOPS: usize = 10;
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 0.1;
/// About 11 m at the equator.
pub const DEFAULT_DUPLICATE_THRESHOLD_DEG: f64 = 0.0001;

/// Configuration for stop planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRules {
    /// Fraction of rated autonomy used between two charges
    pub safety_margin: f64,
    /// Upper bound on the number of charging stops per route
    pub max_stops: usize,
    /// Half-width of the station search box around a candidate point, in degrees
    pub search_radius_deg: f64,
    /// Two stations closer than this on both axes are the same station
    pub duplicate_threshold_deg: f64,
}

impl Default for PlanningRules {
    fn default() -> Self {
        Self {
            safety_margin: DEFAULT_SAFETY_MARGIN,
            max_stops: DEFAULT_MAX_STOPS,
            search_radius_deg: DEFAULT_SEARCH_RADIUS_DEG,
            duplicate_threshold_deg: DEFAULT_DUPLICATE_THRESHOLD_DEG,
        }
    }
}
