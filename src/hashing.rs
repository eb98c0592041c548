//! Hashing - SHA-256 Digests of Manifest Text
//!
//! Logged on write and check so runs can be compared without diffing files.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Short digest for log lines: first 12 hex chars.
pub fn manifest_digest(text: &str) -> String {
    let mut full = sha256_hex(text.as_bytes());
    full.truncate(12);
    full
}
