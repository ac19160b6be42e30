use jiff::Timestamp;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{User, UserRole};

/// Prefix carried by every issued token and expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// JWT claims issued at signup/signin.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub nickname: String,
    /// Role authority, e.g. `ROLE_USER`
    pub user_role: String,
    /// Issued at (seconds)
    pub iat: i64,
    /// Expiration (seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Timestamp::now().as_second();

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            user_role: user.user_role.authority().to_string(),
            iat: now,
            exp: now + expiration_hours * 3600,
        }
    }
}

/// Identity of the authenticated caller.
///
/// Built once per request from verified claims and handed to services by value;
/// it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub authorities: Vec<String>,
}

impl AuthUser {
    pub fn new(id: i64, email: String, nickname: String, role: UserRole) -> Self {
        Self {
            id,
            email,
            nickname,
            authorities: vec![role.authority().to_string()],
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    pub fn is_admin(&self) -> bool {
        self.has_authority(UserRole::Admin.authority())
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::unauthorized("Invalid token subject"))?;

        Ok(Self {
            id,
            email: claims.email,
            nickname: claims.nickname,
            authorities: vec![claims.user_role],
        })
    }
}

/// Signs and verifies access tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expiration_hours: i64,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtService {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Issues a token for `user`, already prefixed with `Bearer `.
    pub fn create_token(&self, user: &User) -> AppResult<String> {
        let claims = Claims::new(user, self.expiration_hours);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
        })?;

        Ok(format!("{BEARER_PREFIX}{token}"))
    }

    /// Verifies a raw token (no prefix) and returns its claims.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::unauthorized("Token has expired")
            }
            jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                AppError::unauthorized("Invalid token signature")
            }
            _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
        })
    }

    /// Resolves an `Authorization` header value into the caller's identity.
    pub fn authenticate(&self, header_value: &str) -> AppResult<AuthUser> {
        let token = strip_bearer(header_value)
            .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;
        AuthUser::try_from(self.validate_token(token)?)
    }
}

/// Returns the token part of a `Bearer <token>` value.
pub fn strip_bearer(value: &str) -> Option<&str> {
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff_diesel::ToDiesel;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing_0123456789";

    fn user(role: UserRole) -> User {
        let now = jiff::civil::date(2025, 1, 1).at(0, 0, 0, 0).to_diesel();
        User {
            id: 7,
            email: "test@example.com".to_string(),
            password: "hash".to_string(),
            user_role: role,
            nickname: "tester".to_string(),
            created_at: now,
            modified_at: now,
        }
    }

    #[test]
    fn test_create_token_has_bearer_prefix() {
        let service = JwtService::new(TEST_SECRET, 1);
        let token = service.create_token(&user(UserRole::User)).unwrap();

        assert!(token.starts_with("Bearer "));
        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    fn test_authenticate_round_trip() {
        let service = JwtService::new(TEST_SECRET, 1);
        let token = service.create_token(&user(UserRole::Admin)).unwrap();

        let auth = service.authenticate(&token).unwrap();
        assert_eq!(auth.id, 7);
        assert_eq!(auth.email, "test@example.com");
        assert_eq!(auth.nickname, "tester");
        assert_eq!(auth.authorities, vec!["ROLE_ADMIN".to_string()]);
        assert!(auth.is_admin());
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = JwtService::new(TEST_SECRET, 1)
            .create_token(&user(UserRole::User))
            .unwrap();
        let other = JwtService::new("another_secret_key_that_is_long_enough", 1);

        let result = other.authenticate(&token);
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(TEST_SECRET, -2);
        let token = service.create_token(&user(UserRole::User)).unwrap();

        match service.authenticate(&token) {
            Err(AppError::Unauthorized { message }) => assert_eq!(message, "Token has expired"),
            other => panic!("Expected expired token error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_prefix_rejected() {
        let service = JwtService::new(TEST_SECRET, 1);
        assert!(matches!(
            service.authenticate("abc.def.ghi"),
            Err(AppError::Unauthorized { .. })
        ));
        assert_eq!(strip_bearer("Bearer "), None);
        assert_eq!(strip_bearer("Bearer abc"), Some("abc"));
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = Claims {
            sub: "abc".to_string(),
            email: "a@b.c".to_string(),
            nickname: "n".to_string(),
            user_role: "ROLE_USER".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(AuthUser::try_from(claims).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let service = JwtService::new(TEST_SECRET, 1);
        let debug = format!("{:?}", service);
        assert!(!debug.contains(TEST_SECRET));
    }
}
