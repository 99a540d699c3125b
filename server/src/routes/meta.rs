use axum::response::Json;
use serde_json::{json, Value};

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /health
///
/// Liveness only; does not touch the store.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
