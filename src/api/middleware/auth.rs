//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::AuthUser;

/// Validates `Authorization: Bearer <token>` and inserts the caller's
/// [`AuthUser`] into the request extensions.
///
/// # Errors
/// 401 when the header is missing, malformed, expired or badly signed.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let auth_user: AuthUser = state.jwt.authenticate(auth_header)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
