use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::inference::pipeline::Prediction;
use crate::state::AppState;

pub const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object with a \"text\" field.";

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    /// Missing text is treated as empty and rejected by validation.
    #[serde(default)]
    pub text: String,
}

/// POST /predict
///
/// Runs the full pipeline on the submitted text. Inference is CPU-bound, so it
/// runs on the blocking pool.
pub async fn handle_predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Prediction>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected request body: {rejection}");
        AppError::Validation(INVALID_BODY_MESSAGE.to_string())
    })?;

    let pipeline = state.pipeline.clone();
    let prediction = tokio::task::spawn_blocking(move || pipeline.run(&request.text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("inference task failed: {e}")))??;

    Ok(Json(prediction))
}
