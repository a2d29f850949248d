//! Administrator credential check
//!
//! There is a single administrator, configured by phone and password rather
//! than stored as a member. The password is hashed once at startup so the
//! plaintext does not stay in memory.

use super::password::{hash_password, verify_password, PasswordError};

#[derive(Clone)]
pub struct AdminCredentials {
    phone: String,
    password_hash: String,
}

impl AdminCredentials {
    pub fn new(phone: impl Into<String>, password: &str) -> Result<Self, PasswordError> {
        Ok(Self {
            phone: phone.into(),
            password_hash: hash_password(password)?,
        })
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns `true` when both phone and password match
    pub fn verify(&self, phone: &str, password: &str) -> Result<bool, PasswordError> {
        if phone.trim() != self.phone {
            return Ok(false);
        }
        verify_password(password, &self.password_hash)
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}
