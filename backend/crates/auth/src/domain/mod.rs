//! Domain Layer
//!
//! Value objects, entities, and the storage/notification capability traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{credential::Credential, session::Session};
pub use repository::{
    AuthEventNotifier, CredentialRepository, KeyValueStore, SessionRepository, StoreError,
    StoreResult,
};
