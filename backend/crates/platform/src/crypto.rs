//! Cryptographic Utilities

use rand::distributions::Alphanumeric;
use rand::{Rng, rngs::OsRng};

/// Generate an opaque bearer token of `len` characters from `[A-Za-z0-9]`
///
/// Drawn from the operating system CSPRNG. At 32 characters this is
/// about 190 bits of entropy.
pub fn random_token(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
