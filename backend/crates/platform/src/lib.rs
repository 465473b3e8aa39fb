//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the gateway crates:
//! - Environment-driven configuration helpers
//! - Session cookie formatting and parsing
//! - Random session token generation
//! - Password hashing (Argon2id)
//! - Outbound HTTP client construction

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod http;
pub mod password;
