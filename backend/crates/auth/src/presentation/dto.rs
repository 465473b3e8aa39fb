//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::credentials::CredentialsInput;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Signup / Login
// ============================================================================

/// Body of `POST /auth/signup` and `POST /auth/login`
///
/// Fields are kept untyped so a missing field and a non-string field can be
/// told apart and reported with their own messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

impl AuthRequest {
    /// Presence check, then type check.
    pub fn into_input(self) -> AuthResult<CredentialsInput> {
        if is_missing(&self.name) || is_missing(&self.password) {
            return Err(AuthError::InvalidInput(
                "Name and password are required".to_string(),
            ));
        }

        match (self.name, self.password) {
            (Some(Value::String(name)), Some(Value::String(password))) => {
                Ok(CredentialsInput { name, password })
            }
            _ => Err(AuthError::InvalidInput(
                "Name and password must be strings".to_string(),
            )),
        }
    }
}

/// Absent, `null`, `false`, `0` and `""` all count as not provided
fn is_missing(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_) | Value::Object(_)) => false,
    }
}

/// Successful signup/login response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> AuthRequest {
        serde_json::from_value(body).unwrap()
    }

    fn message(body: Value) -> String {
        request(body).into_input().unwrap_err().public_message()
    }

    #[test]
    fn test_required() {
        let required = "Name and password are required";
        assert_eq!(message(json!({})), required);
        assert_eq!(message(json!({"name": "alice123"})), required);
        assert_eq!(message(json!({"name": "", "password": "secret1"})), required);
        assert_eq!(message(json!({"name": null, "password": "secret1"})), required);
    }

    #[test]
    fn test_strings() {
        let strings = "Name and password must be strings";
        assert_eq!(message(json!({"name": 123, "password": "secret1"})), strings);
        assert_eq!(message(json!({"name": "alice123", "password": ["x"]})), strings);
        assert_eq!(message(json!({"name": true, "password": "secret1"})), strings);
    }

    #[test]
    fn test_into_input() {
        let input = request(json!({"name": "alice123", "password": "secret1"}))
            .into_input()
            .unwrap();
        assert_eq!(input.name, "alice123");
        assert_eq!(input.password, "secret1");
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_value(AuthResponse {
            username: "alice123".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"username": "alice123"}));
    }
}
