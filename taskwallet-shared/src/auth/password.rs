//! Password hashing module using Argon2id
//!
//! Account passwords are stored as Argon2id PHC strings. Plaintext never
//! reaches the snapshot file.
//!
//! # Parameters
//!
//! - **Memory**: 19 MiB (19456 KiB)
//! - **Iterations**: 2 passes
//! - **Parallelism**: 1 lane
//! - **Output**: 32-byte hash
//!
//! Verification reads the parameters back out of the stored hash, so these can
//! be raised later without invalidating existing accounts.
//!
//! # Example
//!
//! ```
//! use taskwallet_shared::auth::password::{hash_password, verify_password};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("123456")?;
//! assert!(verify_password("123456", &hash)?);
//! assert!(!verify_password("654321", &hash)?);
//! # Ok(())
//! # }
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Shortest password accepted at registration or on change
pub const MIN_PASSWORD_LEN: usize = 6;

/// Longest password accepted (bounds hashing cost)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password using Argon2id
///
/// Returns the PHC string (algorithm, parameters, salt and hash), e.g.
/// `$argon2id$v=19$m=19456,t=2,p=1$...`.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash
/// itself is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Validates password length
///
/// The platform only enforces a length window; phone-number style PINs such
/// as `123456` are accepted.
///
/// # Example
///
/// ```
/// use taskwallet_shared::auth::password::validate_password;
///
/// assert!(validate_password("123456").is_ok());
/// assert!(validate_password("12345").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(format!(
            "Password must be at most {} characters long",
            MAX_PASSWORD_LEN
        ));
    }
    Ok(())
}
