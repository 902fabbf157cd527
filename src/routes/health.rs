use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — liveness check for the load balancer.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
