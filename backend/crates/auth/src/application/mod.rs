//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod create_session;
pub mod credentials;
pub mod log_in;
pub mod log_out;
pub mod notify;
pub mod sign_up;

// Re-exports
pub use check_session::{CheckSessionUseCase, ValidatedSession};
pub use config::AuthConfig;
pub use create_session::CreateSessionUseCase;
pub use credentials::{CredentialsInput, ValidCredentials};
pub use log_in::{LogInOutput, LogInUseCase};
pub use log_out::LogOutUseCase;
pub use notify::spawn_auth_notification;
pub use sign_up::{SignUpOutput, SignUpUseCase};
