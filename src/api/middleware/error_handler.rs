//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaves the API as `{status, code, message}`. Server-side
//! failures are logged in full and answered with a generic message.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Upper bound for bodies read back by `global_error_handler`.
const MAX_ERROR_BODY: usize = 64 * 1024;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let message = public_message(&self);

        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

/// Status code for each error kind. Missing records are answered with 400.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. }
        | AppError::BadRequest { .. }
        | AppError::Validation { .. }
        | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::InvalidRole { .. }
        | AppError::ExternalService { .. }
        | AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message safe to show to the client.
fn public_message(error: &AppError) -> String {
    match error {
        AppError::InvalidRole { .. } | AppError::Configuration { .. } => {
            "Server configuration error".to_string()
        }
        AppError::ExternalService { service, .. } => {
            format!("External service '{}' is unavailable", service)
        }
        AppError::Database { .. } => "A database error occurred".to_string(),
        AppError::ConnectionPool { .. } => "Service temporarily unavailable".to_string(),
        AppError::Internal { .. } => "An internal server error occurred".to_string(),
        other => other.to_string(),
    }
}

/// Rewrites non-JSON error responses produced outside the handlers
/// (unknown route, wrong method, timeouts) into the standard body.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, MAX_ERROR_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let message = if original.is_empty() || status.is_server_error() {
        default_message(status).to_string()
    } else {
        original
    };

    (status, Json(ErrorResponse::new(status, message))).into_response()
}

fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad request - invalid or malformed request",
        StatusCode::NOT_FOUND => "The requested resource was not found",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type",
        StatusCode::REQUEST_TIMEOUT => "Request timeout",
        StatusCode::PAYLOAD_TOO_LARGE => "Request payload too large",
        StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable",
        s if s.is_server_error() => "An internal server error occurred",
        _ => "Request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_is_bad_request() {
        let response = AppError::not_found("Todo").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"status": "BAD_REQUEST", "code": 400, "message": "Todo not found"})
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("x"), StatusCode::BAD_REQUEST),
            (
                AppError::Validation {
                    field: "f".into(),
                    reason: "r".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("x"), StatusCode::FORBIDDEN),
            (
                AppError::Duplicate {
                    entity: "users".into(),
                    field: "email".into(),
                    value: "a".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                AppError::InvalidRole {
                    authority: "ROLE_X".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::external("weather", "down"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timeout"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error_to_status_code(&error), expected, "{error:?}");
        }
    }

    #[tokio::test]
    async fn test_server_errors_are_sanitized() {
        let response = AppError::Database {
            operation: "insert".into(),
            source: anyhow::anyhow!("password=hunter2 connection refused"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "A database error occurred");
        assert!(!json.to_string().contains("hunter2"));

        let response = AppError::InvalidRole {
            authority: "ROLE_ROOT".into(),
        }
        .into_response();
        let json = body_json(response).await;
        assert_eq!(json["status"], "INTERNAL_SERVER_ERROR");
        assert!(!json.to_string().contains("ROLE_ROOT"));
    }

    #[tokio::test]
    async fn test_global_error_handler_wraps_plain_responses() {
        let app = Router::new()
            .route("/teapot", get(|| async { (StatusCode::BAD_REQUEST, "bad things") }))
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["status"], "NOT_FOUND");
        assert_eq!(json["message"], "The requested resource was not found");

        let response = app
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["code"], 400);
        assert_eq!(json["message"], "bad things");
    }
}
