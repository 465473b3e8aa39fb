//! Credential Entity
//!
//! `user_name → password hash`, stored without expiry. Created once at
//! signup and never mutated by this service.

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

#[derive(Debug, Clone)]
pub struct Credential {
    pub user_name: UserName,
    pub password_hash: UserPassword,
}

impl Credential {
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_name,
            password_hash,
        }
    }
}
