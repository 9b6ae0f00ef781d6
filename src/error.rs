use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// JSON error payload: `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Body that could not be read as the expected JSON, reported in the
/// same `{ "error": ... }` shape as every other failure.
pub fn bad_body(rejection: JsonRejection) -> ApiError {
    warn!(status = %rejection.status(), reason = %rejection.body_text(), "rejected request body");
    api_error(StatusCode::BAD_REQUEST, "Invalid request body")
}
