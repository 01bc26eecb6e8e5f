use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version and which pipeline stages loaded at startup.
/// `degraded` means predictions cannot be served at all.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let stages = state.pipeline.stages();
    let status = if stages.personality && stages.career {
        "ok"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careerlens",
        "stages": stages,
        "ai_detection_threshold": state.config.ai_detection_threshold,
    }))
}
