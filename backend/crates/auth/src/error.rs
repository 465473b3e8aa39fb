//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::repository::StoreError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message shown for every failure whose details stay server-side
const GENERIC_FAILURE: &str = "Internal server error";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed name or password; the message is user-facing
    #[error("{0}")]
    InvalidInput(String),

    /// Signup collision on the normalized user name
    #[error("User already exists")]
    DuplicateUser,

    /// Login failure (unknown user and wrong password are indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No cookie, unknown token, or expired session
    #[error("Session not found or expired")]
    SessionMissingOrExpired,

    /// Session belongs to a different user than the URL claims
    #[error("Session belongs to another user")]
    UsernameMismatch,

    /// Key-value store unreachable, slow, or failing
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) => ErrorKind::BadRequest,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SessionMissingOrExpired
            | AuthError::UsernameMismatch => ErrorKind::Unauthorized,
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Message safe to send to clients
    pub fn public_message(&self) -> String {
        match self {
            AuthError::SessionMissingOrExpired | AuthError::UsernameMismatch => {
                "Unauthorized".to_string()
            }
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the session cookie should be cleared alongside this error
    pub fn clears_session(&self) -> bool {
        matches!(
            self,
            AuthError::UsernameMismatch | AuthError::StoreUnavailable(_)
        )
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Auth store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::UsernameMismatch => {
                tracing::warn!("Session used against another user's path");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::InvalidInput("x".into()).kind().status_code(),
            400
        );
        assert_eq!(AuthError::DuplicateUser.kind().status_code(), 409);
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::UsernameMismatch.kind().status_code(), 401);
        assert_eq!(
            AuthError::StoreUnavailable(StoreError::Timeout("get"))
                .kind()
                .status_code(),
            500
        );
    }

    #[test]
    fn test_store_details_never_public() {
        let err = AuthError::StoreUnavailable(StoreError::Connection(
            "redis://10.0.0.5:6379 refused".into(),
        ));
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("10.0.0.5"));
    }

    #[test]
    fn test_clears_session() {
        assert!(AuthError::UsernameMismatch.clears_session());
        assert!(AuthError::StoreUnavailable(StoreError::Timeout("get")).clears_session());
        assert!(!AuthError::SessionMissingOrExpired.clears_session());
        assert!(!AuthError::InvalidCredentials.clears_session());
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.public_message(),
            "Invalid credentials"
        );
        assert_eq!(AuthError::DuplicateUser.public_message(), "User already exists");
        assert_eq!(
            AuthError::InvalidInput("Name and password are required".into()).public_message(),
            "Name and password are required"
        );
    }
}
