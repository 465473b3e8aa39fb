//! User Name Value Object
//!
//! A user name is the public handle embedded in dashboard URLs
//! (`/dashboard/<user_name>/...`) and the key of the credentials namespace.
//!
//! ## Processing order
//! 1. Validate the raw input: ASCII letters and digits only, at least 3
//! 2. Canonicalize: trim, lowercase, drop anything outside `[a-z0-9]`
//!
//! ## Invariants
//! - Canonical form is non-empty, lowercase alphanumeric, length >= 3
//! - Two inputs differing only in case map to the same user

use serde::Serialize;
use std::fmt;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// Raw input is not `^[a-zA-Z0-9]{3,}$`
    InvalidFormat,

    /// Canonicalization left nothing
    EmptyAfterSanitize,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat => write!(
                f,
                "Name must be alphanumeric and at least 3 characters long"
            ),
            Self::EmptyAfterSanitize => {
                write!(f, "Invalid name: must be alphanumeric, min 3 chars")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Canonical (normalized) user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Validate raw input and canonicalize it.
    pub fn parse(raw: &str) -> Result<Self, UserNameError> {
        if !is_valid_format(raw) {
            return Err(UserNameError::InvalidFormat);
        }

        sanitize_username(raw)
            .map(Self)
            .ok_or(UserNameError::EmptyAfterSanitize)
    }

    /// Wrap a value read back from the store, already canonical.
    pub(crate) fn from_canonical(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `^[a-zA-Z0-9]{3,}$`
fn is_valid_format(raw: &str) -> bool {
    raw.len() >= USER_NAME_MIN_LENGTH && raw.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Trim, lowercase, and strip everything outside `[a-z0-9]`.
///
/// Returns `None` when nothing is left.
pub fn sanitize_username(raw: &str) -> Option<String> {
    let normalized: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
