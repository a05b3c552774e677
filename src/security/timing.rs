//! Timing attack protection utilities
//!
//! Secrets are compared through fixed-size SHA-256 digests so that neither
//! the content nor the length of the expected value shows up in timing.

use sha2::{Digest, Sha256};

/// Constant-time byte array comparison
pub fn constant_time_eq_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.iter().zip(b.iter()) {
        result |= byte_a ^ byte_b;
    }

    result == 0
}

/// Compare two byte strings in time independent of where they differ or how long they are
pub fn digest_eq(a: &[u8], b: &[u8]) -> bool {
    let digest_a = Sha256::digest(a);
    let digest_b = Sha256::digest(b);
    constant_time_eq_bytes(digest_a.as_slice(), digest_b.as_slice())
}
