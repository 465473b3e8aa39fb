//! User Password Value Object
//!
//! Domain wrappers over `platform::password`. The clear-text side is
//! zeroized on drop; only the Argon2id PHC string is ever persisted.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate against the signup/login policy (at least 6 characters).
    ///
    /// The error carries the message shown to the user.
    pub fn new(raw: String) -> Result<Self, String> {
        ClearTextPassword::new(raw).map(Self).map_err(|e| match e {
            PasswordPolicyError::TooShort { .. } | PasswordPolicyError::Empty => {
                "Password must be at least 6 characters long".to_string()
            }
        })
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&self.0).finish()
    }
}

/// Stored password hash
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password (CPU and memory heavy; call off the async runtime)
    pub fn from_raw(raw: &RawPassword) -> Result<Self, PasswordHashError> {
        raw.0.hash().map(Self)
    }

    /// Restore from a PHC string read back from the credentials namespace
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&self.0).finish()
    }
}
