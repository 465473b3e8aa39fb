//! Infrastructure Layer
//!
//! Store implementations, typed repositories over them, and the backend
//! notification client.

pub mod kv;
pub mod memory;
pub mod notifier;
pub mod redis;

pub use kv::{KvCredentialRepository, KvSessionRepository};
pub use memory::MemoryStore;
pub use notifier::{HttpAuthNotifier, NoopNotifier};
pub use redis::{RedisStore, RedisStoreConfig};
