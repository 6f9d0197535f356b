use axum::Json;

use gallery_types::api::HealthResponse;

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK" })
}
