//! # Protocol Configuration & Constants
//!
//! Every fixed value in linkchain lives here: the genesis literals, the
//! block cadence of the demo driver, and the payload pool it samples from.
//!
//! The genesis values are part of the chain's identity. Changing any of them
//! produces a different chain that no existing history will restore into.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Crate-independent protocol version, reported by `linkchain-node version`.
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Hash function used for block linkage.
pub const HASH_FUNCTION: &str = "SHA-256";

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Height of the genesis block.
pub const GENESIS_HEIGHT: u64 = 0;

/// Placeholder predecessor hash carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Fixed genesis timestamp (ms since epoch). Arbitrary, kept for reproducibility.
pub const GENESIS_TIMESTAMP: u64 = 1_595_490_064_640;

/// Genesis payload.
pub const GENESIS_PAYLOAD: &str = "GenesisBlock";

/// Hardcoded genesis hash.
///
/// This is an opaque literal, NOT the SHA-256 of the genesis fields. The
/// genesis block is exempt from hash re-validation; successors only ever
/// compare their `previous_hash` against this stored value.
pub const GENESIS_HASH: &str =
    "0000000000000000000d87bedef9550a014af9a3af74b791d84d049cc3ca85f4";

// ---------------------------------------------------------------------------
// Block Production
// ---------------------------------------------------------------------------

/// Interval between synthesized blocks in the demo driver.
pub const BLOCK_TIME: Duration = Duration::from_secs(2);

/// [`BLOCK_TIME`] in milliseconds, the `--interval-ms` default.
pub const BLOCK_TIME_MS: u64 = BLOCK_TIME.as_millis() as u64;

/// Payloads the demo producer picks from.
pub const SAMPLE_PAYLOADS: &[&str] = &[
    "alice pays bob 5",
    "bob pays carol 3",
    "carol pays dave 1",
    "dave pays erin 8",
    "erin pays frank 2",
    "frank pays grace 13",
    "grace pays heidi 21",
    "heidi pays ivan 34",
    "ivan pays alice 55",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_hash_shape() {
        assert_eq!(GENESIS_HASH.len(), 64);
        assert!(GENESIS_HASH
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_genesis_literals() {
        assert_eq!(GENESIS_HEIGHT, 0);
        assert_eq!(GENESIS_PREVIOUS_HASH, "0");
        assert_eq!(GENESIS_TIMESTAMP, 1595490064640);
        assert_eq!(GENESIS_PAYLOAD, "GenesisBlock");
    }

    #[test]
    fn test_timing_constants_sanity() {
        assert!(BLOCK_TIME.as_millis() > 0);
        assert_eq!(BLOCK_TIME_MS, 2_000);
    }

    #[test]
    fn test_sample_payloads_non_empty() {
        assert!(!SAMPLE_PAYLOADS.is_empty());
        assert!(SAMPLE_PAYLOADS.iter().all(|p| !p.is_empty()));
    }
}
