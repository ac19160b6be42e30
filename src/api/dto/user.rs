//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{User, UserProfile, UserRole};

/// Public part of a user, embedded in todo/comment/manager responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "kim")]
    pub nickname: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
        }
    }
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            nickname: profile.nickname,
        }
    }
}

/// `PUT /users` body.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    #[schema(format = "password")]
    pub old_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    #[schema(format = "password", min_length = 8)]
    pub new_password: String,
}

/// `PATCH /users/nickname` body.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ChangeNicknameRequest {
    #[validate(length(min = 1, max = 64, message = "Nickname must be between 1 and 64 characters"))]
    #[schema(min_length = 1, max_length = 64)]
    pub nickname: String,
}

/// `PATCH /admin/users/{userId}` body.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UserRoleChangeRequest {
    #[validate(length(min = 1, message = "Role is required"))]
    #[schema(example = "ADMIN")]
    pub role: String,
}

/// Admin view of a user after a role change.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub user_role: UserRole,
}

impl From<User> for UserRoleResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            user_role: user.user_role,
        }
    }
}
