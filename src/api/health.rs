use axum::{response::IntoResponse, Json};
use serde_json::{json, Value};

/// Liveness payload with the server clock in unix seconds.
pub fn health() -> Value {
    json!({ "ok": true, "time": chrono::Utc::now().timestamp() })
}

pub fn version() -> Value {
    json!({ "ok": true, "version": env!("CARGO_PKG_VERSION") })
}

pub async fn health_handler() -> impl IntoResponse {
    Json(health())
}
