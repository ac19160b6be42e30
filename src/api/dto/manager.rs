//! Manager DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::UserResponse;
use crate::models::{Manager, User};

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ManagerSaveRequest {
    #[validate(range(min = 1, message = "Manager user id must be positive"))]
    pub manager_user_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserResponse,
}

impl From<(Manager, User)> for ManagerResponse {
    fn from((manager, user): (Manager, User)) -> Self {
        Self {
            id: manager.id,
            user: user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_camel_case() {
        let req: ManagerSaveRequest = serde_json::from_str(r#"{"managerUserId":5}"#).unwrap();
        assert_eq!(req.manager_user_id, 5);
        assert!(req.validate().is_ok());

        let req: ManagerSaveRequest = serde_json::from_str(r#"{"managerUserId":0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
