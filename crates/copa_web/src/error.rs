use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use copa_core::Error;
use serde_json::json;
use tracing::{error, warn};

/// Response-side wrapper for the shared error taxonomy.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::UpstreamUnavailable(detail) => {
                warn!(%detail, "news upstream unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({"total": 0, "items": [], "error": "NEWSAPI_UNAVAILABLE"}),
                )
            }
            Error::InvalidRequest(detail) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "INVALID_REQUEST", "detail": detail}),
            ),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, json!({"error": "UNAUTHORIZED"})),
            Error::Forbidden => (StatusCode::FORBIDDEN, json!({"error": "FORBIDDEN"})),
            Error::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                json!({"error": "NOT_FOUND", "detail": detail}),
            ),
            Error::Conflict(detail) => (
                StatusCode::CONFLICT,
                json!({"error": "CONFLICT", "detail": detail}),
            ),
            other => {
                error!(error = %other, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "INTERNAL"}),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
