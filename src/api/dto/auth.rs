//! Authentication DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email", example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(format = "password")]
    pub password: String,
    /// `USER` or `ADMIN` (a `ROLE_` prefix is accepted)
    #[validate(length(min = 1, message = "User role is required"))]
    #[schema(example = "USER")]
    pub user_role: String,
    #[validate(length(min = 1, max = 64, message = "Nickname must be between 1 and 64 characters"))]
    pub nickname: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(format = "password")]
    pub password: String,
}

/// Token issued by signup/signin, already carrying the `Bearer ` prefix.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[schema(example = "Bearer eyJhbGciOiJIUzI1NiJ9...")]
    pub bearer_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_camel_case() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"email":"a@example.com","password":"Passw0rd!","userRole":"USER","nickname":"a"}"#,
        )
        .unwrap();
        assert_eq!(req.user_role, "USER");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_value(TokenResponse {
            bearer_token: "Bearer x".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"bearerToken": "Bearer x"}));
    }
}
