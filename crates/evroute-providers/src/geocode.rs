//! HERE geocoding client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use evroute_core::{GeoPoint, Geocoder, Lookup};
use reqwest::Client;
use serde_json::Value;

use crate::http::{into_lookup, read_json, trim_base_url};

pub const DEFAULT_HERE_GEOCODE_URL: &str = "https://geocode.search.hereapi.com";

/// Resolves city names through the HERE `v1/geocode` endpoint.
pub struct HereGeocoder {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HereGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            api_key: api_key.into(),
        }
    }

    /// Fetch the best match for `place`; `None` when HERE has no candidate.
    pub async fn fetch_position(&self, place: &str) -> Result<Option<GeoPoint>> {
        let url = format!("{}/v1/geocode", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("apiKey", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to send geocode request")?;

        let payload = read_json(response, "Geocode").await?;
        Ok(parse_geocode(&payload))
    }
}

#[async_trait]
impl Geocoder for HereGeocoder {
    async fn geocode(&self, place: &str) -> Lookup<GeoPoint> {
        let place = place.trim();
        if place.is_empty() {
            return Lookup::NotFound;
        }

        let lookup = into_lookup("HERE geocoder", self.fetch_position(place).await);
        if let Lookup::Found(point) = &lookup {
            tracing::debug!(place, lat = point.lat, lon = point.lon, "Geocoded place");
        }
        lookup
    }
}

/// First item's `position.{lat,lng}`.
pub fn parse_geocode(payload: &Value) -> Option<GeoPoint> {
    let position = payload
        .get("items")
        .and_then(|items| items.as_array())
        .and_then(|items| items.first())
        .and_then(|item| item.get("position"))?;

    let lat = position.get("lat").and_then(|v| v.as_f64())?;
    let lon = position.get("lng").and_then(|v| v.as_f64())?;
    GeoPoint::try_new(lon, lat).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_first_item_position() {
        let payload = json!({
            "items": [
                {"title": "Paris, France", "position": {"lat": 48.85717, "lng": 2.3414}},
                {"title": "Paris, TX", "position": {"lat": 33.66, "lng": -95.55}}
            ]
        });
        let point = parse_geocode(&payload).unwrap();
        assert_eq!(point.lat, 48.85717);
        assert_eq!(point.lon, 2.3414);
    }

    #[test]
    fn no_items_means_no_position() {
        assert_eq!(parse_geocode(&json!({"items": []})), None);
        assert_eq!(parse_geocode(&json!({})), None);
        assert_eq!(
            parse_geocode(&json!({"items": [{"position": {"lat": 95.0, "lng": 2.0}}]})),
            None
        );
    }

    #[tokio::test]
    async fn blank_place_is_not_looked_up() {
        let geocoder = HereGeocoder::new(Client::new(), "http://127.0.0.1:1", "key");
        assert_eq!(geocoder.geocode("   ").await, Lookup::NotFound);
    }

    #[tokio::test]
    async fn unreachable_service_is_reported() {
        let geocoder = HereGeocoder::new(Client::new(), "http://127.0.0.1:1", "key");
        assert!(geocoder.geocode("Lyon").await.is_unavailable());
    }
}
