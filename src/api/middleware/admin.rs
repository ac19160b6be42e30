//! Admin gate with an audit trail.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::utils::jwt::AuthUser;

/// Lets only `ROLE_ADMIN` callers through and writes one audit record per
/// admin request. Must run after [`super::auth_middleware`].
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    let method = request.method().clone();
    let uri = request.uri().clone();

    if !auth_user.is_admin() {
        tracing::warn!(
            target: "audit",
            user_id = auth_user.id,
            %method,
            %uri,
            "Admin access denied"
        );
        return Err(AppError::forbidden("Admin role required"));
    }

    let response = next.run(request).await;

    tracing::info!(
        target: "audit",
        user_id = auth_user.id,
        %method,
        %uri,
        status = response.status().as_u16(),
        at = %jiff::Timestamp::now(),
        "Admin request"
    );

    Ok(response)
}
