//! Error types for chain validation and history replay.
//!
//! [`ValidationError`] explains why a candidate cannot extend a tip.
//! [`ChainError`] covers whole-chain problems found while restoring or
//! re-verifying a block sequence.

use thiserror::Error;

/// Reason a candidate block was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Candidate height is not exactly tip height + 1.
    #[error("height mismatch: expected {expected}, got {got}")]
    HeightMismatch {
        /// Tip height + 1.
        expected: u64,
        /// Height carried by the candidate.
        got: u64,
    },

    /// Candidate does not reference the tip's hash.
    #[error("previous hash mismatch: expected {expected}, got {got}")]
    PreviousHashMismatch {
        /// Hash of the current tip.
        expected: String,
        /// `previous_hash` carried by the candidate.
        got: String,
    },

    /// The tip already sits at the highest representable height.
    #[error("height overflow: tip at height {height} has no successor")]
    HeightOverflow {
        /// Height of the tip.
        height: u64,
    },

    /// Stored hash does not match the hash of the candidate's own fields.
    #[error("block {height} hash mismatch: stored={stored}, computed={computed}")]
    HashMismatch {
        /// Height of the offending block.
        height: u64,
        /// Hash carried by the block.
        stored: String,
        /// Hash recomputed from the block's fields.
        computed: String,
    },
}

/// Whole-chain integrity failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A history must contain at least the genesis block.
    #[error("history is empty")]
    EmptyHistory,

    /// The first block of a history is not the genesis literal.
    #[error("first block is not the genesis block (hash {found})")]
    GenesisMismatch {
        /// Hash of the block found at index 0.
        found: String,
    },

    /// A block after genesis fails validation against its predecessor.
    #[error("invalid block at position {position}: {source}")]
    InvalidBlock {
        /// Index of the offending block in the sequence.
        position: usize,
        /// Why it was rejected.
        #[source]
        source: ValidationError,
    },
}
