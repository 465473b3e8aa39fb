//! Auth (Credential & Session) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, entities, store and repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Redis and in-memory stores, repositories, backend notifier
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Signup/login with user name + password
//! - Opaque random session tokens with sliding expiry
//! - Session validation against the user name a URL claims
//! - Best-effort signup/login notification to the backend
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, only the PHC string is stored
//! - Credentials and sessions live in separate store namespaces
//! - Any store failure during validation denies the request

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryStore, RedisStore, RedisStoreConfig};
pub use presentation::{AuthAppState, auth_router};
