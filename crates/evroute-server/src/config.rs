//! Server configuration from environment.

use evroute_core::rules::{
    DEFAULT_DUPLICATE_THRESHOLD_DEG, DEFAULT_MAX_STOPS, DEFAULT_SAFETY_MARGIN,
    DEFAULT_SEARCH_RADIUS_DEG,
};
use evroute_core::PlanningRules;
use evroute_providers::geocode::DEFAULT_HERE_GEOCODE_URL;
use evroute_providers::routing::DEFAULT_ORS_URL;
use evroute_providers::stations::{DEFAULT_STATIONS_DATASET, DEFAULT_STATIONS_URL};
use evroute_providers::vehicles::DEFAULT_CHARGETRIP_URL;
use evroute_providers::DEFAULT_TIMEOUT_SECS;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,

    // External services
    pub here_api_key: String,
    pub here_geocode_url: String,
    pub ors_api_key: String,
    pub ors_url: String,
    pub chargetrip_url: String,
    pub chargetrip_client_id: String,
    pub chargetrip_app_id: String,
    pub stations_url: String,
    pub stations_dataset: String,
    pub http_timeout_s: u64,

    // Stop planning
    pub safety_margin: f64,
    pub max_stops: usize,
    pub search_radius_deg: f64,
    pub duplicate_threshold_deg: f64,

    pub vehicle_cache_ttl_s: u64,
    pub vehicle_cache_max: usize,

    pub rate_limit_enabled: bool,
    pub rate_limit_rps: u32,
    /// Take the client IP from `X-Forwarded-For` when behind a proxy
    pub trust_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            here_api_key: String::new(),
            here_geocode_url: DEFAULT_HERE_GEOCODE_URL.to_string(),
            ors_api_key: String::new(),
            ors_url: DEFAULT_ORS_URL.to_string(),
            chargetrip_url: DEFAULT_CHARGETRIP_URL.to_string(),
            chargetrip_client_id: String::new(),
            chargetrip_app_id: String::new(),
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            stations_dataset: DEFAULT_STATIONS_DATASET.to_string(),
            http_timeout_s: DEFAULT_TIMEOUT_SECS,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            max_stops: DEFAULT_MAX_STOPS,
            search_radius_deg: DEFAULT_SEARCH_RADIUS_DEG,
            duplicate_threshold_deg: DEFAULT_DUPLICATE_THRESHOLD_DEG,
            vehicle_cache_ttl_s: 600,
            vehicle_cache_max: 256,
            rate_limit_enabled: true,
            rate_limit_rps: 5,
            trust_proxy: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source; unset or unparsable keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);
        let positive = |key: &str, default: f64| {
            parsed::<f64>(lookup(key))
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        };

        Self {
            server_port: parsed(lookup("EVROUTE_PORT")).unwrap_or(defaults.server_port),
            here_api_key: text("HERE_API_KEY", defaults.here_api_key),
            here_geocode_url: text("HERE_GEOCODE_URL", defaults.here_geocode_url),
            ors_api_key: text("ORS_API_KEY", defaults.ors_api_key),
            ors_url: text("ORS_URL", defaults.ors_url),
            chargetrip_url: text("CHARGETRIP_URL", defaults.chargetrip_url),
            chargetrip_client_id: text("CHARGETRIP_CLIENT_ID", defaults.chargetrip_client_id),
            chargetrip_app_id: text("CHARGETRIP_APP_ID", defaults.chargetrip_app_id),
            stations_url: text("STATIONS_URL", defaults.stations_url),
            stations_dataset: text("STATIONS_DATASET", defaults.stations_dataset),
            http_timeout_s: parsed::<u64>(lookup("EVROUTE_HTTP_TIMEOUT_S"))
                .filter(|v| *v > 0)
                .unwrap_or(defaults.http_timeout_s),
            safety_margin: positive("EVROUTE_SAFETY_MARGIN", defaults.safety_margin),
            max_stops: parsed(lookup("EVROUTE_MAX_STOPS")).unwrap_or(defaults.max_stops),
            search_radius_deg: positive("EVROUTE_SEARCH_RADIUS_DEG", defaults.search_radius_deg),
            duplicate_threshold_deg: positive(
                "EVROUTE_DUPLICATE_THRESHOLD_DEG",
                defaults.duplicate_threshold_deg,
            ),
            vehicle_cache_ttl_s: parsed(lookup("EVROUTE_VEHICLE_CACHE_TTL_S"))
                .unwrap_or(defaults.vehicle_cache_ttl_s),
            vehicle_cache_max: parsed(lookup("EVROUTE_VEHICLE_CACHE_MAX"))
                .unwrap_or(defaults.vehicle_cache_max),
            rate_limit_enabled: lookup("EVROUTE_RATE_LIMIT_ENABLED")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.rate_limit_enabled),
            rate_limit_rps: parsed::<u32>(lookup("EVROUTE_RATE_LIMIT_RPS"))
                .filter(|v| *v > 0)
                .unwrap_or(defaults.rate_limit_rps),
            trust_proxy: lookup("EVROUTE_TRUST_PROXY")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.trust_proxy),
        }
    }

    pub fn planning_rules(&self) -> PlanningRules {
        PlanningRules {
            safety_margin: self.safety_margin,
            max_stops: self.max_stops,
            search_radius_deg: self.search_radius_deg,
            duplicate_threshold_deg: self.duplicate_threshold_deg,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_s)
    }

    pub fn vehicle_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.vehicle_cache_ttl_s)
    }
}

fn parsed<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.trim().parse().ok())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
