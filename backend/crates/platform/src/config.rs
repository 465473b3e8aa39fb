//! Environment Configuration Helpers
//!
//! Small typed readers over `std::env`. Missing variables fall back to the
//! provided default; unparsable values fall back too, with a warning, so a
//! typo in `.env` never takes the gateway down at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Read a string variable, or `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a non-empty string variable.
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable, or `default` when unset or invalid.
pub fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Invalid value in environment, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a boolean flag (`1`/`true`/`yes`/`on`, case-insensitive).
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

/// Read a duration expressed in whole seconds.
pub fn env_secs_or(key: &str, default_secs: u64) -> Duration {
    Duration::from_secs(env_parse_or(key, default_secs))
}

/// Read a duration expressed in milliseconds.
pub fn env_millis_or(key: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_parse_or(key, default_ms))
}

/// Split a comma-separated list, dropping blanks.
pub fn env_list(key: &str) -> Vec<String> {
    env_opt(key)
        .map(|raw| {
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
