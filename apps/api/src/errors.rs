use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::inference::error::InferenceError;

pub const AI_GENERATED_MESSAGE: &str =
    "AI-generated text detected. Please enter a human-written text.";
pub const INVALID_TYPE_MESSAGE: &str = "Invalid MBTI type provided.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("AI-generated text detected")]
    AiGeneratedDetected,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The predicted label is unknown to the career model's encoder.
    #[error("Invalid personality type: {0}")]
    InvalidPersonalityType(String),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::AiGeneratedDetected => {
                (StatusCode::BAD_REQUEST, AI_GENERATED_MESSAGE.to_string())
            }
            AppError::InvalidPersonalityType(label) => {
                tracing::warn!("Predicted label '{label}' is not known to the MBTI encoder");
                (StatusCode::BAD_REQUEST, INVALID_TYPE_MESSAGE.to_string())
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Service unavailable: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Inference(e) => {
                tracing::error!("Inference error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_is_400_with_message() {
        let response = AppError::Validation("too short".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "too short" }));
    }

    #[tokio::test]
    async fn test_ai_generated_is_400() {
        let response = AppError::AiGeneratedDetected.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": AI_GENERATED_MESSAGE })
        );
    }

    #[tokio::test]
    async fn test_invalid_type_is_400_without_label() {
        let response = AppError::InvalidPersonalityType("XXXX".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": INVALID_TYPE_MESSAGE })
        );
    }

    #[tokio::test]
    async fn test_unavailable_is_500() {
        let response = AppError::ServiceUnavailable("model gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "model gone" }));
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let response = AppError::Internal(anyhow::anyhow!("secret path /etc/x")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": INTERNAL_ERROR_MESSAGE })
        );
    }

    #[tokio::test]
    async fn test_inference_error_is_generic_500() {
        let response = AppError::from(InferenceError::EmptyOutput).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": INTERNAL_ERROR_MESSAGE })
        );
    }
}
