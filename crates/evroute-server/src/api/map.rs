use axum::Json;
use evroute_core::{DefaultMapResponse, MapView};

/// GET /api/default-map
pub async fn default_map() -> Json<DefaultMapResponse> {
    Json(DefaultMapResponse {
        map: MapView::default_view(),
    })
}
