//! Repository Traits
//!
//! Interfaces for persistence and outbound notifications. Implementations
//! live in the infrastructure layer.

use std::time::Duration;

use thiserror::Error;

use crate::domain::entity::{credential::Credential, session::Session};
use crate::domain::value_object::{
    auth_mode::AuthMode, session_token::SessionToken, user_name::UserName,
};
use crate::error::AuthResult;

// ============================================================================
// Key-value store capability
// ============================================================================

/// Failures reported by a [`KeyValueStore`]
///
/// Surfaced to callers immediately; stores never retry a command on their own.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connection could not be established or was lost
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// Command did not complete within the per-operation timeout
    #[error("Store operation `{0}` timed out")]
    Timeout(&'static str),

    /// Store rejected the command
    #[error("Store command failed: {0}")]
    Command(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal TTL-capable key-value store
///
/// One handle addresses one namespace. Credentials and sessions use two
/// independent handles so flushing or leaking one never touches the other.
/// Every operation is a single atomic key operation; handles are shared by
/// many concurrent requests.
#[trait_variant::make(KeyValueStore: Send)]
pub trait LocalKeyValueStore {
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `key → value`. `ttl = None` means no expiry.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()>;

    /// Write only if `key` is absent, without expiry. Returns whether it wrote.
    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Reset the remaining TTL of `key` to `ttl`. Returns `false` if the key
    /// does not exist.
    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool>;

    async fn delete(&self, key: &str) -> StoreResult<()>;
}

// ============================================================================
// Typed repositories
// ============================================================================

/// Credentials namespace: `user_name → password hash`
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    async fn exists(&self, user_name: &UserName) -> AuthResult<bool>;

    async fn find(&self, user_name: &UserName) -> AuthResult<Option<Credential>>;

    /// Persist a new credential. Returns `false` if the user name is taken.
    async fn create(&self, credential: &Credential) -> AuthResult<bool>;
}

/// Sessions namespace: `token → user_name`, with sliding TTL
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// User name the token belongs to, if the session is still alive
    async fn find_user_name(&self, token: &SessionToken) -> AuthResult<Option<UserName>>;

    /// Reset the session TTL. Returns `false` if the session already expired.
    async fn refresh(&self, token: &SessionToken, ttl: Duration) -> AuthResult<bool>;

    async fn delete(&self, token: &SessionToken) -> AuthResult<()>;
}

// ============================================================================
// Outbound notifications
// ============================================================================

/// Failure delivering an auth event
#[derive(Debug, Error)]
#[error("Auth event notification failed: {0}")]
pub struct NotifyError(pub String);

/// Tells the backend content service that a user signed up or logged in
///
/// Called on a detached task; failures are only logged.
#[trait_variant::make(AuthEventNotifier: Send)]
pub trait LocalAuthEventNotifier {
    async fn notify(&self, mode: AuthMode, user_name: &UserName) -> Result<(), NotifyError>;
}
