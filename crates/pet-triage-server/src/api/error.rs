//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pet_triage_core::ValidationError;
use pet_triage_llm::TriageError;
use serde::Serialize;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

const UNAVAILABLE_HINT: &str =
    "Check the model backend configuration, or use structured mode with fallback enabled.";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, hint) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail, None),
            ApiError::ModelUnavailable(reason) => {
                tracing::warn!(reason = %reason, "Rejecting request: model unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_UNAVAILABLE",
                    format!("Model unavailable: {reason}"),
                    Some(UNAVAILABLE_HINT),
                )
            }
            ApiError::GenerationFailed(cause) => {
                tracing::error!(cause = %cause, "Generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    format!("Generation failed: {cause}"),
                    None,
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                hint,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Validation(e) => e.into(),
            TriageError::ModelUnavailable { reason } => ApiError::ModelUnavailable(reason),
            TriageError::GenerationFailed(cause) => ApiError::GenerationFailed(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn validation_error_returns_400() {
        let response = ApiError::from(ValidationError::MissingField("symptoms")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"].as_str().unwrap().contains("symptoms"));
        assert!(json["error"].get("hint").is_none());
    }

    #[tokio::test]
    async fn model_unavailable_returns_500_with_hint() {
        let err: ApiError = TriageError::ModelUnavailable {
            reason: "weights not found".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "MODEL_UNAVAILABLE");
        assert!(json["error"]["hint"].is_string());
    }

    #[tokio::test]
    async fn generation_failure_returns_500() {
        let err: ApiError = TriageError::GenerationFailed("oom".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "GENERATION_FAILED");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("join error".into()).into_response();
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
