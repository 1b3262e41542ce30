//! Trip planning integration tests.
//!
//! Exercise a running server wired to the real external services.
//!
//! Run with: cargo test --test planner_test -- --ignored
//! Requires a running EV route planner with API keys configured.

use evroute_core::{DefaultMapResponse, TripPlanResponse, VehicleListResponse};
use reqwest::{Client, StatusCode};
use serde_json::json;

fn base_url() -> String {
    std::env::var("EVROUTE_TEST_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

async fn first_vehicle_id(client: &Client) -> String {
    let list: VehicleListResponse = client
        .get(format!("{}/api/vehicles", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    list.vehicles
        .first()
        .map(|v| v.id.clone())
        .expect("catalog returned no vehicles")
}

#[tokio::test]
#[ignore]
async fn test_health() {
    let resp = Client::new()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
#[ignore]
async fn test_default_map() {
    let map: DefaultMapResponse = Client::new()
        .get(format!("{}/api/default-map", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(map.map.zoom, 6);
}

#[tokio::test]
#[ignore]
async fn test_long_trip_gets_charging_stops() {
    let client = Client::new();
    let vehicle = first_vehicle_id(&client).await;

    let resp = client
        .post(format!("{}/api/route", base_url()))
        .json(&json!({"start": "Paris", "end": "Marseille", "vehicle": vehicle}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let plan: TripPlanResponse = resp.json().await.unwrap();
    assert!(!plan.route.is_empty());
    assert!(plan.distance > 500.0);
    assert!(plan.nb_stations <= plan.required_stops);
    assert_eq!(plan.nb_stations, plan.stations.len());
    assert_eq!(plan.start_point.name, "Paris");
}

#[tokio::test]
#[ignore]
async fn test_missing_parameters_rejected() {
    let resp = Client::new()
        .post(format!("{}/api/route", base_url()))
        .json(&json!({"start": "Paris"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_unknown_vehicle_is_not_found() {
    let resp = Client::new()
        .get(format!("{}/api/vehicle/does-not-exist", base_url()))
        .send()
        .await
        .unwrap();
    assert!(matches!(
        resp.status(),
        StatusCode::NOT_FOUND | StatusCode::BAD_GATEWAY
    ));
}
