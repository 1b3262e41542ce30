//! EV Route providers - HTTP clients for the planner's external services
//!
//! Each client implements one of the collaborator traits from `evroute-core`.

pub mod geocode;
pub mod http;
pub mod routing;
pub mod stations;
pub mod vehicles;

pub use geocode::HereGeocoder;
pub use http::{build_client, DEFAULT_TIMEOUT_SECS};
pub use routing::OpenRouteServiceClient;
pub use stations::OpenDataSoftStations;
pub use vehicles::ChargetripClient;
