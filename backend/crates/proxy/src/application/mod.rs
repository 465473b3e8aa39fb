//! Application Layer

pub mod config;
pub mod guard;

pub use config::ProxyConfig;
pub use guard::{GuardOutcome, RouteGuardUseCase};
