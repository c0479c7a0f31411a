//! Short code generation.
//!
//! The primary path derives a code from the target URL and its creation
//! timestamp; [`random_code`] is the fallback used after a collision.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Shortest configurable length for generated codes.
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest configurable length for generated codes.
pub const MAX_CODE_LENGTH: usize = 32;

/// Alphabet for generated codes: 26 upper, 26 lower, 10 digits.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Derives a short code from a URL and the instant it is being shortened.
///
/// The seed is the URL followed by the RFC 3339 timestamp at nanosecond
/// precision. The seed is hashed with SHA-256 and each digest byte is mapped
/// modulo 62 into [`ALPHABET`]. Codes longer than one digest keep hashing the
/// previous digest for more bytes.
///
/// The output is a pure function of `(url, created_at, length)`.
///
/// # Examples
///
/// ```ignore
/// let at = Utc::now();
/// assert_eq!(derive_code("https://a.io", at, 6), derive_code("https://a.io", at, 6));
/// ```
pub fn derive_code(url: &str, created_at: DateTime<Utc>, length: usize) -> String {
    let seed = format!(
        "{}{}",
        url,
        created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    );

    let mut digest = Sha256::digest(seed.as_bytes());
    let mut code = String::with_capacity(length);

    while code.len() < length {
        for byte in digest.iter().take(length - code.len()) {
            code.push(ALPHABET[*byte as usize % ALPHABET.len()] as char);
        }
        digest = Sha256::digest(digest);
    }

    code
}

/// Derives a short code for `url` seeded with the current time.
pub fn generate_code(url: &str, length: usize) -> String {
    derive_code(url, Utc::now(), length)
}

/// Draws a code uniformly at random from [`ALPHABET`].
///
/// Carries no relation to any URL; used only to escape collisions.
pub fn random_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
