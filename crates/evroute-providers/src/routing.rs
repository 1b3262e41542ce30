//! OpenRouteService directions client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use evroute_core::{GeoPoint, Lookup, Route, RouteProvider};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::http::{into_lookup, read_json, trim_base_url};

pub const DEFAULT_ORS_URL: &str = "https://api.openrouteservice.org";

/// Fetches driving polylines from `v2/directions/driving-car`.
pub struct OpenRouteServiceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenRouteServiceClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            api_key: api_key.into(),
        }
    }

    /// Fetch the driving polyline. `None` when no route connects the points.
    pub async fn fetch_polyline(&self, start: GeoPoint, end: GeoPoint) -> Result<Option<Route>> {
        let url = format!("{}/v2/directions/driving-car", self.base_url);
        let start = format!("{},{}", start.lon, start.lat);
        let end = format!("{},{}", end.lon, end.lat);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.api_key.as_str())
            .query(&[("start", start.as_str()), ("end", end.as_str())])
            .send()
            .await
            .context("Failed to send directions request")?;

        // ORS answers 404 for points it cannot route between
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let payload = read_json(response, "Directions").await?;
        Ok(parse_polyline(&payload))
    }
}

#[async_trait]
impl RouteProvider for OpenRouteServiceClient {
    async fn route_polyline(&self, start: GeoPoint, end: GeoPoint) -> Lookup<Route> {
        let lookup = into_lookup("OpenRouteService", self.fetch_polyline(start, end).await);
        if let Lookup::Found(route) = &lookup {
            tracing::debug!(points = route.len(), "Fetched route polyline");
        }
        lookup
    }
}

/// `features[0].geometry.coordinates` as `[lon, lat]` pairs.
///
/// Malformed pairs are skipped; a polyline with no usable point is `None`.
pub fn parse_polyline(payload: &Value) -> Option<Route> {
    let coordinates = payload
        .get("features")
        .and_then(|features| features.as_array())
        .and_then(|features| features.first())
        .and_then(|feature| feature.get("geometry"))
        .and_then(|geometry| geometry.get("coordinates"))
        .and_then(|coordinates| coordinates.as_array())?;

    let points: Vec<GeoPoint> = coordinates
        .iter()
        .filter_map(|pair| {
            let pair = pair.as_array()?;
            let lon = pair.first()?.as_f64()?;
            let lat = pair.get(1)?.as_f64()?;
            GeoPoint::try_new(lon, lat).ok()
        })
        .collect();

    Route::new(points).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_lon_lat_pairs_in_order() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[2.3522, 48.8566], [3.0573, 50.6292], [4.8357, 45.764, 172.0]]
                }
            }]
        });

        let route = parse_polyline(&payload).unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(route.first(), Some(&GeoPoint::new(2.3522, 48.8566)));
        assert_eq!(route.last(), Some(&GeoPoint::new(4.8357, 45.764)));
    }

    #[test]
    fn malformed_pairs_are_dropped() {
        let payload = json!({
            "features": [{"geometry": {"coordinates": [[2.0], "x", [2.1, 48.1], [null, 1.0]]}}]
        });
        let route = parse_polyline(&payload).unwrap();
        assert_eq!(route.points(), &[GeoPoint::new(2.1, 48.1)]);
    }

    #[test]
    fn empty_or_missing_geometry_is_no_route() {
        assert!(parse_polyline(&json!({"features": []})).is_none());
        assert!(parse_polyline(&json!({"features": [{"geometry": {"coordinates": []}}]})).is_none());
        assert!(parse_polyline(&json!({"error": {"code": 2010}})).is_none());
    }

    #[tokio::test]
    async fn unreachable_service_is_reported() {
        let client = OpenRouteServiceClient::new(Client::new(), "http://127.0.0.1:1/", "key");
        let lookup = client
            .route_polyline(GeoPoint::new(2.35, 48.85), GeoPoint::new(4.83, 45.76))
            .await;
        assert!(lookup.is_unavailable());
    }
}
