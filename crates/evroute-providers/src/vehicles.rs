//! Chargetrip GraphQL vehicle catalog.

use anyhow::{Context, Result};
use async_trait::async_trait;
use evroute_core::{
    Connector, Lookup, VehicleCatalog, VehicleDetails, VehicleProfile, VehicleSummary,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::{into_lookup, read_json};

pub const DEFAULT_CHARGETRIP_URL: &str = "https://api.chargetrip.io/graphql";

const VEHICLE_LIST_QUERY: &str = r#"
query {
  vehicleList(page: 0, size: 20) {
    id
    naming { make model }
  }
}
"#;

const VEHICLE_DETAILS_QUERY: &str = r#"
query vehicle($vehicleId: ID!) {
  vehicle(id: $vehicleId) {
    id
    naming { make model chargetrip_version }
    media { image { url } }
    connectors { standard time }
    battery { usable_kwh }
    range { chargetrip_range { best } }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Client for the Chargetrip vehicle API.
pub struct ChargetripClient {
    client: Client,
    url: String,
    client_id: String,
    app_id: String,
}

impl ChargetripClient {
    pub fn new(
        client: Client,
        url: impl Into<String>,
        client_id: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            client_id: client_id.into(),
            app_id: app_id.into(),
        }
    }

    /// Run a GraphQL query and return its `data` object.
    async fn query(&self, query: &str, variables: Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.url)
            .header("x-client-id", self.client_id.as_str())
            .header("x-app-id", self.app_id.as_str())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .context("Failed to send Chargetrip query")?;

        let payload = read_json(response, "Chargetrip").await?;
        graphql_data(payload)
    }

    pub async fn fetch_vehicle_list(&self) -> Result<Vec<VehicleSummary>> {
        let data = self.query(VEHICLE_LIST_QUERY, json!({})).await?;
        Ok(parse_vehicle_list(&data))
    }

    /// `None` when Chargetrip knows no vehicle with this id.
    pub async fn fetch_vehicle_details(&self, vehicle_id: &str) -> Result<Option<VehicleDetails>> {
        let data = self
            .query(VEHICLE_DETAILS_QUERY, json!({ "vehicleId": vehicle_id }))
            .await?;
        Ok(parse_vehicle_details(vehicle_id, &data))
    }
}

#[async_trait]
impl VehicleCatalog for ChargetripClient {
    async fn list_vehicles(&self) -> Lookup<Vec<VehicleSummary>> {
        let result = self.fetch_vehicle_list().await.map(Some);
        into_lookup("Chargetrip catalog", result)
    }

    async fn vehicle_details(&self, vehicle_id: &str) -> Lookup<VehicleDetails> {
        if vehicle_id.trim().is_empty() {
            return Lookup::NotFound;
        }
        let lookup = into_lookup(
            "Chargetrip catalog",
            self.fetch_vehicle_details(vehicle_id).await,
        );
        if let Lookup::Found(details) = &lookup {
            tracing::debug!(
                vehicle_id,
                autonomy_km = details.profile.autonomy_km,
                "Fetched vehicle details"
            );
        }
        lookup
    }
}

/// The `data` object of a GraphQL response.
///
/// Errors alongside a `data` object are field-level (an unknown vehicle id
/// nulls `vehicle`) and leave the parsers to decide. Errors without `data`
/// fail the query.
fn graphql_data(mut payload: Value) -> Result<Value> {
    let data = payload.get_mut("data").map(Value::take).unwrap_or(Value::Null);
    match graphql_error(&payload) {
        Some(message) if !data.is_object() => {
            Err(anyhow::anyhow!("Chargetrip query failed: {}", message))
        }
        Some(message) => {
            tracing::debug!(error = %message, "Chargetrip returned partial data");
            Ok(data)
        }
        None => Ok(data),
    }
}

/// First `errors[].message`, if the response carries any.
fn graphql_error(payload: &Value) -> Option<String> {
    let errors = payload.get("errors")?.as_array()?;
    let first = errors.first()?;
    Some(
        first
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string(),
    )
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |node, key| node.get(key))
        .and_then(|v| v.as_str())
}

fn f64_at(value: &Value, path: &[&str]) -> Option<f64> {
    path.iter()
        .try_fold(value, |node, key| node.get(key))
        .and_then(|v| v.as_f64())
}

/// Entries of `vehicleList`; entries without an id are skipped.
pub fn parse_vehicle_list(data: &Value) -> Vec<VehicleSummary> {
    let Some(entries) = data.get("vehicleList").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(|v| v.as_str())?;
            Some(VehicleSummary {
                id: id.to_string(),
                make: str_at(entry, &["naming", "make"]).unwrap_or_default().to_string(),
                model: str_at(entry, &["naming", "model"]).unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// The `vehicle` object as [`VehicleDetails`].
///
/// A null `vehicle` or an unusable profile (negative or non-finite figures)
/// is `None`. Missing range or battery figures count as zero, which plans no
/// stops and yields no estimate downstream.
pub fn parse_vehicle_details(vehicle_id: &str, data: &Value) -> Option<VehicleDetails> {
    let vehicle = data.get("vehicle").filter(|v| v.is_object())?;

    let connectors = vehicle
        .get("connectors")
        .and_then(|v| v.as_array())
        .map(|connectors| {
            connectors
                .iter()
                .filter_map(|connector| {
                    Some(Connector {
                        standard: connector.get("standard")?.as_str()?.to_string(),
                        time: connector.get("time")?.as_f64()?,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let autonomy_km = f64_at(vehicle, &["range", "chargetrip_range", "best"]).unwrap_or(0.0);
    let usable_kwh = f64_at(vehicle, &["battery", "usable_kwh"]).unwrap_or(0.0);
    let profile = match VehicleProfile::new(autonomy_km, usable_kwh, connectors) {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(vehicle_id, error = %err, "Ignoring vehicle with invalid profile");
            return None;
        }
    };

    Some(VehicleDetails {
        id: vehicle
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or(vehicle_id)
            .to_string(),
        make: str_at(vehicle, &["naming", "make"]).unwrap_or_default().to_string(),
        model: str_at(vehicle, &["naming", "model"]).unwrap_or_default().to_string(),
        version: str_at(vehicle, &["naming", "chargetrip_version"]).map(str::to_string),
        image_url: str_at(vehicle, &["media", "image", "url"]).map(str::to_string),
        profile,
    })
}
