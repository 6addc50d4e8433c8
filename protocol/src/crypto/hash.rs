//! # Hashing Utilities
//!
//! SHA-256 is the only digest linkchain uses. Block hashes are rendered as
//! lowercase hex strings because that is how they are stored, compared and
//! printed everywhere else in the crate.
//!
//! ## Block hash preimage
//!
//! ```text
//! height (decimal) || previous_hash || timestamp (decimal) || payload
//! ```
//!
//! No separators, no length prefixes. This is not injective in general
//! (`height=1, previous_hash="2..."` and `height=12, previous_hash="..."`
//! share a preimage prefix), but the layout is fixed: the genesis literal and
//! every stored block hash were produced with exactly this concatenation, so
//! changing it would orphan them.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data` as a fixed-size array.
///
/// # Example
///
/// ```
/// use linkchain_protocol::crypto::sha256;
///
/// let digest = sha256(b"linkchain");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// SHA-256 of `data`, hex-encoded (lowercase, 64 chars).
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Compute a block hash from its four content fields.
///
/// The fields are stringified and concatenated in the fixed order
/// `height, previous_hash, timestamp, payload` before hashing. The result is
/// the lowercase hex SHA-256 digest.
///
/// # Example
///
/// ```
/// use linkchain_protocol::crypto::compute_hash;
///
/// let h = compute_hash(1, "0", 1_000, "hello");
/// assert_eq!(h.len(), 64);
/// assert_eq!(h, compute_hash(1, "0", 1_000, "hello"));
/// ```
pub fn compute_hash(height: u64, previous_hash: &str, timestamp: u64, payload: &str) -> String {
    let preimage = format!("{height}{previous_hash}{timestamp}{payload}");
    sha256_hex(preimage.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // NIST test vector for "abc".
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha256_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_hex_matches_array() {
        let data = b"linkchain";
        assert_eq!(sha256_hex(data), hex::encode(sha256(data)));
    }

    #[test]
    fn compute_hash_is_plain_concatenation() {
        let direct = sha256_hex(b"1abc1595490064641payload");
        assert_eq!(compute_hash(1, "abc", 1_595_490_064_641, "payload"), direct);
    }

    #[test]
    fn compute_hash_is_deterministic() {
        let a = compute_hash(7, "deadbeef", 42, "x");
        let b = compute_hash(7, "deadbeef", 42, "x");
        assert_eq!(a, b);
    }

    #[test]
    fn compute_hash_is_lowercase_hex() {
        let h = compute_hash(3, "prev", 99, "data");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn compute_hash_changes_with_every_field() {
        let base = compute_hash(1, "prev", 1_000, "x");
        assert_ne!(base, compute_hash(2, "prev", 1_000, "x"));
        assert_ne!(base, compute_hash(1, "prev2", 1_000, "x"));
        assert_ne!(base, compute_hash(1, "prev", 1_001, "x"));
        assert_ne!(base, compute_hash(1, "prev", 1_000, "y"));
    }
}
