use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cxaudit_core::CxAuditError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<CxAuditError> for ApiError {
    fn from(err: CxAuditError) -> Self {
        match err {
            CxAuditError::UnknownCompany(id) => {
                ApiError::BadRequest(format!("Unknown company: {}", id))
            }
            CxAuditError::RateLimited(_) => ApiError::RateLimited,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Try again later.".to_string(),
            ),
            ApiError::Internal(detail) => {
                // Detailed cause stays server-side; the client gets a
                // generic message.
                error!(error = %detail, "audit generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Audit generation failed".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
