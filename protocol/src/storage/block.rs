//! # Block Structure
//!
//! A block is one immutable record in the ledger. It links to its
//! predecessor through `previous_hash` and commits to its own content
//! through `hash`.
//!
//! ## Block Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Block                                      │
//! │  ├── height: u64          (genesis = 0)     │
//! │  ├── previous_hash: String                  │
//! │  ├── timestamp: u64       (ms since epoch)  │
//! │  ├── payload: String      (opaque)          │
//! │  └── hash: String         (SHA-256, hex)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Fields are private. A block built through [`Block::new`] carries whatever
//! hash the caller supplied, forged or not; [`Block::next`] computes the
//! correct one. Whether a block may extend a chain is decided by
//! [`Chain::validate`](super::chain::Chain::validate), never by the block.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{
    GENESIS_HASH, GENESIS_HEIGHT, GENESIS_PAYLOAD, GENESIS_PREVIOUS_HASH, GENESIS_TIMESTAMP,
};
use crate::crypto::hash::compute_hash;

use super::error::ValidationError;

/// A single ledger record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    height: u64,
    previous_hash: String,
    timestamp: u64,
    payload: String,
    hash: String,
}

impl Block {
    /// Assemble a block from raw parts. The hash is taken as given.
    pub fn new(
        height: u64,
        previous_hash: impl Into<String>,
        timestamp: u64,
        payload: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Block {
            height,
            previous_hash: previous_hash.into(),
            timestamp,
            payload: payload.into(),
            hash: hash.into(),
        }
    }

    /// The fixed first block of every chain.
    ///
    /// Its hash is a hardcoded literal and does not match
    /// [`compute_hash`] over its own fields.
    pub fn genesis() -> Self {
        Block::new(
            GENESIS_HEIGHT,
            GENESIS_PREVIOUS_HASH,
            GENESIS_TIMESTAMP,
            GENESIS_PAYLOAD,
            GENESIS_HASH,
        )
    }

    /// Build the correctly linked and hashed successor of `parent`.
    ///
    /// Fails with [`ValidationError::HeightOverflow`] when `parent` is at
    /// `u64::MAX`.
    pub fn next(
        parent: &Block,
        timestamp: u64,
        payload: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let height = parent.successor_height()?;
        let payload = payload.into();
        let hash = compute_hash(height, &parent.hash, timestamp, &payload);

        Ok(Block {
            height,
            previous_hash: parent.hash.clone(),
            timestamp,
            payload,
            hash,
        })
    }

    /// Height a block extending this one must carry.
    pub fn successor_height(&self) -> Result<u64, ValidationError> {
        self.height
            .checked_add(1)
            .ok_or(ValidationError::HeightOverflow {
                height: self.height,
            })
    }

    /// Recompute the hash from this block's content fields.
    pub fn compute_hash(&self) -> String {
        compute_hash(self.height, &self.previous_hash, self.timestamp, &self.payload)
    }

    /// Whether the stored hash matches the content.
    ///
    /// Always false for the genesis block.
    pub fn has_consistent_hash(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// Whether this is byte-for-byte the genesis literal.
    pub fn is_genesis(&self) -> bool {
        *self == Block::genesis()
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for Block {
    /// One table row: height, abbreviated hashes, timestamp, payload.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6} │ {:<16} │ {:<16} │ {:>13} │ {}",
            self.height,
            abbreviate(&self.previous_hash),
            abbreviate(&self.hash),
            self.timestamp,
            self.payload,
        )
    }
}

fn abbreviate(hash: &str) -> &str {
    // Hashes are ASCII hex, so byte slicing is on a char boundary.
    match hash.get(..16) {
        Some(prefix) => prefix,
        None => hash,
    }
}
