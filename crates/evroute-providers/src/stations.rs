//! Charging station lookup against the OpenDataSoft records API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use evroute_core::{ChargingStation, GeoPoint, StationLookup, StationResolver};
use reqwest::Client;
use serde_json::Value;

use crate::http::{as_coordinate, into_lookup, read_json, trim_base_url};

pub const DEFAULT_STATIONS_URL: &str = "https://odre.opendatasoft.com";
pub const DEFAULT_STATIONS_DATASET: &str = "bornes-irve";
pub const UNKNOWN_STATION_NAME: &str = "Unknown station";

/// Finds charging stations in an OpenDataSoft dataset (IRVE by default).
pub struct OpenDataSoftStations {
    client: Client,
    base_url: String,
    dataset: String,
}

impl OpenDataSoftStations {
    pub fn new(client: Client, base_url: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            dataset: dataset.into(),
        }
    }

    /// First station inside the box `point ± radius_deg`.
    pub async fn fetch_station(
        &self,
        point: GeoPoint,
        radius_deg: f64,
    ) -> Result<Option<ChargingStation>> {
        let url = format!("{}/api/records/1.0/search/", self.base_url);
        let bbox = bounding_box(point, radius_deg);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("dataset", self.dataset.as_str()),
                ("rows", "1"),
                ("geofilter.bbox", bbox.as_str()),
            ])
            .send()
            .await
            .context("Failed to send station search")?;

        let payload = read_json(response, "Station search").await?;
        Ok(parse_station(&payload))
    }
}

#[async_trait]
impl StationResolver for OpenDataSoftStations {
    async fn find_nearest_station(&self, point: GeoPoint, search_radius_deg: f64) -> StationLookup {
        into_lookup(
            "Station search",
            self.fetch_station(point, search_radius_deg).await,
        )
    }
}

/// `geofilter.bbox` value: `lat-r,lon-r,lat+r,lon+r`.
pub fn bounding_box(point: GeoPoint, radius_deg: f64) -> String {
    format!(
        "{},{},{},{}",
        point.lat - radius_deg,
        point.lon - radius_deg,
        point.lat + radius_deg,
        point.lon + radius_deg
    )
}

/// First record's `fields` as a station.
///
/// Coordinates come from `ylatitude`/`xlongitude` and may be numbers or
/// strings. A record without usable coordinates is treated as no station.
pub fn parse_station(payload: &Value) -> Option<ChargingStation> {
    let fields = payload
        .get("records")
        .and_then(|records| records.as_array())
        .and_then(|records| records.first())
        .and_then(|record| record.get("fields"))?;

    let lat = fields.get("ylatitude").and_then(as_coordinate)?;
    let lon = fields.get("xlongitude").and_then(as_coordinate)?;
    let position = GeoPoint::try_new(lon, lat).ok()?;

    let name = fields
        .get("n_station")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_STATION_NAME)
        .to_string();
    let address = fields
        .get("ad_station")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string);

    Some(ChargingStation {
        position,
        name,
        address,
    })
}
