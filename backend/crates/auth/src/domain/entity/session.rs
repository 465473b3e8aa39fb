//! Session Entity
//!
//! Materialized in the store as `token → user_name` with a TTL. The TTL is
//! the only mutable part and is reset to `ttl` on every authenticated use.

use std::time::Duration;

use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};

#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user_name: UserName,
    pub ttl: Duration,
}

impl Session {
    /// Issue a new session with a fresh random token
    pub fn issue(user_name: UserName, ttl: Duration) -> Self {
        Self {
            token: SessionToken::generate(),
            user_name,
            ttl,
        }
    }
}
