use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nautilus_domain::DomainError;
use serde_json::json;

/// HTTP-facing error for the request surface
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    UnknownDataKind(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Domain(DomainError::Validation(message)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::Domain(DomainError::StoreUnavailable) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database not available".to_string(),
            ),
            ApiError::Domain(DomainError::QueryFailed) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            ApiError::UnknownDataKind(kind) => {
                (StatusCode::NOT_FOUND, format!("unknown data kind: {kind}"))
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
