//! Value Object Module

pub mod auth_mode;
pub mod session_token;
pub mod user_name;
pub mod user_password;
