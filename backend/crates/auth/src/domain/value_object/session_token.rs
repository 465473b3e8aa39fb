//! Session Token Value Object
//!
//! Opaque random bearer token. It is the key of the sessions namespace and
//! the value of the session cookie; it carries no data of its own.

use platform::crypto::random_token;
use std::fmt;

/// Length of newly issued tokens
pub const SESSION_TOKEN_LENGTH: usize = 32;

/// Upper bound accepted from a cookie before we bother the store
const SESSION_TOKEN_MAX_LENGTH: usize = 128;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Issue a fresh token from the OS CSPRNG
    pub fn generate() -> Self {
        Self(random_token(SESSION_TOKEN_LENGTH))
    }

    /// Accept a token presented by a client.
    ///
    /// Anything that could not have been issued by [`SessionToken::generate`]
    /// is rejected up front.
    pub fn from_cookie(value: &str) -> Option<Self> {
        let plausible = !value.is_empty()
            && value.len() <= SESSION_TOKEN_MAX_LENGTH
            && value.bytes().all(|b| b.is_ascii_alphanumeric());

        plausible.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to put in logs
    pub fn log_prefix(&self) -> &str {
        let end = self.0.len().min(6);
        &self.0[..end]
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({}…)", self.log_prefix())
    }
}
