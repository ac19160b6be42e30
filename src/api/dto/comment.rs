//! Comment DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::UserResponse;
use crate::models::{Comment, User, UserProfile};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CommentSaveRequest {
    #[validate(length(min = 1, message = "Contents are required"))]
    pub contents: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserResponse,
}

impl From<(Comment, User)> for CommentResponse {
    fn from((comment, user): (Comment, User)) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents,
            user: user.into(),
        }
    }
}

impl From<(Comment, UserProfile)> for CommentResponse {
    fn from((comment, author): (Comment, UserProfile)) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents,
            user: author.into(),
        }
    }
}
