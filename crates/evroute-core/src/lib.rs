pub mod assembler;
pub mod collaborators;
pub mod distance;
pub mod error;
pub mod models;
pub mod partition;
pub mod plan;
pub mod pricing;
pub mod rules;
pub mod stops;

pub use assembler::{is_duplicate_station, StopAssembler, StopAssembly};
pub use collaborators::{
    Geocoder, Lookup, RouteProvider, StationLookup, StationResolver, VehicleCatalog,
};
pub use distance::{leg_distance_km, route_distance_km, KM_PER_DEGREE};
pub use error::{CoreError, CoreResult};
pub use models::{
    ChargingPlan, ChargingStation, ChargingTimeRequest, ChargingTimeResponse, Connector,
    DefaultMapResponse, GeoPoint, MapView, NamedPoint, Route, StationView, TripPlanResponse,
    TripRequest, VehicleDetails, VehicleDetailsResponse, VehicleListResponse, VehicleProfile,
    VehicleSummary,
};
pub use partition::{partition, search_points, Segment};
pub use plan::plan_charging;
pub use pricing::{round2, LinearTripEstimator, TripEstimate, TripEstimator};
pub use rules::PlanningRules;
pub use stops::{required_stops, required_stops_with_rules};
