//! HTTP client for the planner REST API.

use anyhow::{Context, Result};
use evroute_core::{
    ChargingTimeRequest, ChargingTimeResponse, TripPlanResponse, TripRequest,
    VehicleDetailsResponse, VehicleListResponse, VehicleSummary,
};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// Client for a running planner server.
pub struct PlannerClient {
    base_url: String,
    client: reqwest::Client,
}

impl PlannerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>> {
        let url = format!("{}/api/vehicles", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch vehicles")?;
        let list: VehicleListResponse = read(response, "List vehicles").await?;
        Ok(list.vehicles)
    }

    pub async fn vehicle_details(&self, vehicle_id: &str) -> Result<VehicleDetailsResponse> {
        let url = format!("{}/api/vehicle/{}", self.base_url, vehicle_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch vehicle details")?;
        read(response, "Vehicle details").await
    }

    pub async fn plan_trip(&self, start: &str, end: &str, vehicle: &str) -> Result<TripPlanResponse> {
        let url = format!("{}/api/route", self.base_url);
        let request = TripRequest {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            vehicle: Some(vehicle.to_string()),
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send route request")?;
        read(response, "Route planning").await
    }

    pub async fn charging_time(&self, distance_km: f64, vehicle: &str) -> Result<ChargingTimeResponse> {
        let url = format!("{}/api/charging-time", self.base_url);
        let request = ChargingTimeRequest {
            distance: Some(distance_km),
            vehicle: Some(vehicle.to_string()),
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send charging time request")?;
        read(response, "Charging time").await
    }
}

async fn read<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|err| match err.code {
                Some(code) => format!("{} ({})", err.error, code),
                None => err.error,
            })
            .unwrap_or(body);
        anyhow::bail!("{} failed: {} {}", what, status, message);
    }

    response
        .json::<T>()
        .await
        .with_context(|| format!("Failed to parse {} response", what.to_lowercase()))
}
