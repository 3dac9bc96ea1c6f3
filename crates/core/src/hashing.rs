//! Shared SHA-256 hex digest utility.
//!
//! Used to fingerprint capability tokens in audit entries so the bearer
//! string itself never reaches the logs.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}
