//! Domain error type for store operations
//!
//! Every state transition in [`crate::store`] returns `Result<T, StoreError>`.
//! The variants line up with the HTTP status families the API maps them to,
//! so handlers can propagate them with `?`.
//!
//! # Example
//!
//! ```
//! use taskwallet_shared::error::StoreError;
//!
//! let err = StoreError::conflict("Phone already registered");
//! assert_eq!(err.to_string(), "Conflict: Phone already registered");
//! ```

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate entity or illegal state transition
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Input failed a business rule (minimum withdraw, empty proof link, ...)
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    /// Caller is known but not allowed to perform the action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Credentials did not match
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Password hashing or token plumbing failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        StoreError::Conflict(msg.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        StoreError::Forbidden(msg.into())
    }
}

impl From<crate::auth::password::PasswordError> for StoreError {
    fn from(err: crate::auth::password::PasswordError) -> Self {
        StoreError::Internal(err.to_string())
    }
}
