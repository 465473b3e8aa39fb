//! Credential Input Validation
//!
//! Shared by signup and login. Rules are checked in a fixed order and the
//! first failing rule decides the message.

use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Name and password as submitted, already known to be strings
pub struct CredentialsInput {
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsInput")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Validated and canonicalized credentials
#[derive(Debug)]
pub struct ValidCredentials {
    pub user_name: UserName,
    pub password: RawPassword,
}

impl CredentialsInput {
    /// Apply the name rule, then the password rule, then canonicalize.
    pub fn validate(self) -> AuthResult<ValidCredentials> {
        let user_name =
            UserName::parse(&self.name).map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let password = RawPassword::new(self.password).map_err(AuthError::InvalidInput)?;

        Ok(ValidCredentials {
            user_name,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, password: &str) -> CredentialsInput {
        CredentialsInput {
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    fn message(result: AuthResult<ValidCredentials>) -> String {
        result.unwrap_err().public_message()
    }

    #[test]
    fn test_valid_input_is_canonicalized() {
        let valid = input("Alice123", "secret1").validate().unwrap();
        assert_eq!(valid.user_name.as_str(), "alice123");
    }

    #[test]
    fn test_name_rule() {
        assert_eq!(
            message(input("al", "secret1").validate()),
            "Name must be alphanumeric and at least 3 characters long"
        );
        assert_eq!(
            message(input("alice_1", "secret1").validate()),
            "Name must be alphanumeric and at least 3 characters long"
        );
    }

    #[test]
    fn test_password_rule() {
        assert_eq!(
            message(input("alice123", "12345").validate()),
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_name_rule_checked_before_password_rule() {
        assert_eq!(
            message(input("a!", "1").validate()),
            "Name must be alphanumeric and at least 3 characters long"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", input("alice123", "secret1"));
        assert!(!debug.contains("secret1"));
    }
}
