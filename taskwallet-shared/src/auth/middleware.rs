//! Request authentication helpers
//!
//! The API's auth layers call [`authenticate`] to turn an
//! `Authorization: Bearer <token>` header into an [`AuthContext`], which is
//! then inserted into request extensions.
//!
//! # Example
//!
//! ```
//! use axum::Extension;
//! use taskwallet_shared::auth::middleware::AuthContext;
//!
//! async fn handler(Extension(auth): Extension<AuthContext>) -> String {
//!     format!("Subject: {}", auth.subject)
//! }
//! ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, JwtError, Role};

/// Authentication context added to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// User ID (nil for the administrator)
    pub subject: Uuid,

    /// Role granted by the token
    pub role: Role,
}

impl AuthContext {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            subject: user_id,
            role: Role::User,
        }
    }

    pub fn admin() -> Self {
        Self {
            subject: Uuid::nil(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Error type for request authentication
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

/// Extracts the bearer token from the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

/// Validates the bearer token in `headers` and builds the auth context
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;

    let claims = validate_access_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    Ok(AuthContext {
        subject: claims.sub,
        role: claims.role,
    })
}
