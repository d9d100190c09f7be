use axum::{Json, http::StatusCode};

/// Liveness probe for monitoring and container health checks.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
