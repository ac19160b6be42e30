use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const USER_TAG: &str = "User";
pub const ADMIN_TAG: &str = "Admin";
pub const TODO_TAG: &str = "Todo";
pub const COMMENT_TAG: &str = "Comment";
pub const MANAGER_TAG: &str = "Manager";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "todo-rs",
        description = "Multi-user todo API with weather-stamped todos, managers and comments",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::UserRole,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Signup and signin"),
        (name = USER_TAG, description = "User profile endpoints"),
        (name = ADMIN_TAG, description = "Admin-only user management"),
        (name = TODO_TAG, description = "Todo endpoints"),
        (name = COMMENT_TAG, description = "Todo comments"),
        (name = MANAGER_TAG, description = "Todo managers"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /auth/signin, sent as `Bearer <jwt>`"))
                        .build(),
                ),
            )
        }
    }
}
