//! Error response DTOs.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "BAD_REQUEST",
    "code": 400,
    "message": "Todo not found"
}))]
pub struct ErrorResponse {
    /// Status name, e.g. `BAD_REQUEST`
    pub status: String,
    /// Numeric HTTP status
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status_name(status),
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// `StatusCode::NOT_FOUND` -> `NOT_FOUND`.
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}
