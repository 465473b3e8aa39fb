//! Proxy Error Types
//!
//! Proxy-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Upstream details are logged, never
//! returned to the client.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Proxy-specific result type alias
pub type ProxyResult<T> = Result<T, ProxyError>;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Backend could not be reached or the connection broke
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Backend did not answer within the upstream timeout
    #[error("Upstream timed out")]
    UpstreamTimeout,

    /// Upload rejected before any network call; the message is user-facing
    #[error("{0}")]
    InvalidUpload(String),

    /// Upload body exceeded the configured limit
    #[error("File too large")]
    UploadTooLarge,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProxyError::UpstreamUnavailable(_) => ErrorKind::BadGateway,
            ProxyError::UpstreamTimeout => ErrorKind::GatewayTimeout,
            ProxyError::InvalidUpload(_) => ErrorKind::BadRequest,
            ProxyError::UploadTooLarge => ErrorKind::PayloadTooLarge,
            ProxyError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to send to clients
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::UpstreamUnavailable(_) => "Upstream unavailable".to_string(),
            ProxyError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    pub fn log(&self) {
        match self {
            ProxyError::UpstreamUnavailable(detail) => {
                tracing::error!(detail = %detail, "Upstream request failed");
            }
            ProxyError::UpstreamTimeout => {
                tracing::error!("Upstream request timed out");
            }
            ProxyError::Internal(msg) => {
                tracing::error!(message = %msg, "Proxy internal error");
            }
            ProxyError::InvalidUpload(msg) => {
                tracing::warn!(reason = %msg, "Upload rejected");
            }
            ProxyError::UploadTooLarge => {
                tracing::warn!("Upload exceeded size limit");
            }
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::UpstreamTimeout
        } else {
            ProxyError::UpstreamUnavailable(err.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
