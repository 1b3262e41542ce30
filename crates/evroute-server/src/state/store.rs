//! Application state: collaborator handles, planning rules and caches.

use anyhow::Result;
use evroute_core::{
    Geocoder, LinearTripEstimator, Lookup, PlanningRules, RouteProvider, StationResolver,
    TripEstimator, VehicleCatalog, VehicleDetails,
};
use evroute_providers::{
    build_client, ChargetripClient, HereGeocoder, OpenDataSoftStations, OpenRouteServiceClient,
};
use std::sync::Arc;

use crate::cache::VehicleCache;
use crate::config::Config;

/// The external services a planning request talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub geocoder: Arc<dyn Geocoder>,
    pub routes: Arc<dyn RouteProvider>,
    pub vehicles: Arc<dyn VehicleCatalog>,
    pub stations: Arc<dyn StationResolver>,
}

impl Collaborators {
    /// HTTP-backed collaborators sharing one client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_client(config.http_timeout())?;

        Ok(Self {
            geocoder: Arc::new(HereGeocoder::new(
                client.clone(),
                config.here_geocode_url.clone(),
                config.here_api_key.clone(),
            )),
            routes: Arc::new(OpenRouteServiceClient::new(
                client.clone(),
                config.ors_url.clone(),
                config.ors_api_key.clone(),
            )),
            vehicles: Arc::new(ChargetripClient::new(
                client.clone(),
                config.chargetrip_url.clone(),
                config.chargetrip_client_id.clone(),
                config.chargetrip_app_id.clone(),
            )),
            stations: Arc::new(OpenDataSoftStations::new(
                client,
                config.stations_url.clone(),
                config.stations_dataset.clone(),
            )),
        })
    }
}

/// Application state shared by all handlers.
pub struct AppState {
    collaborators: Collaborators,
    estimator: Arc<dyn TripEstimator>,
    rules: PlanningRules,
    vehicle_cache: VehicleCache,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_collaborators(
            Collaborators::from_config(config)?,
            config,
        ))
    }

    pub fn with_collaborators(collaborators: Collaborators, config: &Config) -> Self {
        Self {
            collaborators,
            estimator: Arc::new(LinearTripEstimator::default()),
            rules: config.planning_rules(),
            vehicle_cache: VehicleCache::new(config.vehicle_cache_ttl(), config.vehicle_cache_max),
        }
    }

    pub fn geocoder(&self) -> &dyn Geocoder {
        self.collaborators.geocoder.as_ref()
    }

    pub fn routes(&self) -> &dyn RouteProvider {
        self.collaborators.routes.as_ref()
    }

    pub fn vehicles(&self) -> &dyn VehicleCatalog {
        self.collaborators.vehicles.as_ref()
    }

    pub fn stations(&self) -> &dyn StationResolver {
        self.collaborators.stations.as_ref()
    }

    pub fn estimator(&self) -> &dyn TripEstimator {
        self.estimator.as_ref()
    }

    pub fn rules(&self) -> &PlanningRules {
        &self.rules
    }

    /// Vehicle details, served from cache when fresh.
    pub async fn vehicle_details(&self, vehicle_id: &str) -> Lookup<VehicleDetails> {
        if let Some(details) = self.vehicle_cache.get(vehicle_id) {
            tracing::debug!(vehicle_id, "Vehicle details cache hit");
            return Lookup::Found(details);
        }

        let lookup = self.vehicles().vehicle_details(vehicle_id).await;
        if let Lookup::Found(details) = &lookup {
            self.vehicle_cache.insert(vehicle_id, details.clone());
        }
        lookup
    }
}
