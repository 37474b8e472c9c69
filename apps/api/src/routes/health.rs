use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and the active network profile.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "tracker-api",
        "mock_network": {
            "latency_min_ms": state.config.mock_latency_min_ms,
            "latency_max_ms": state.config.mock_latency_max_ms,
            "failure_rate": state.config.mock_failure_rate,
        }
    }))
}
