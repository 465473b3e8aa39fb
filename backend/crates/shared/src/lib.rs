//! Shared Kernel - Domain-crossing minimal core
//!
//! Holds the vocabulary every gateway crate agrees on:
//! - The unified [`error::app_error::AppError`] and its result alias
//! - [`error::kind::ErrorKind`], the HTTP-facing error classification
//! - The JSON error body and its axum rendering
//!
//! Nothing here knows about sessions, stores, or upstreams.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
