//! # Chain
//!
//! An append-only, in-memory sequence of blocks anchored at the genesis
//! block. The only mutation is [`Chain::append`] (or its granular sibling
//! [`Chain::try_append`]), and it is gated by [`Chain::validate`].
//!
//! ## Invariants
//!
//! ```text
//! blocks[0]                  == Block::genesis()
//! blocks[i].height           == blocks[i-1].height + 1
//! blocks[i].previous_hash    == blocks[i-1].hash
//! blocks[i].hash             == compute_hash(blocks[i] fields)
//! ```
//!
//! The chain never hands out `&mut Block` and never removes or reorders
//! blocks, so the invariants established on append hold for its lifetime.
//!
//! ## Sharing
//!
//! A `Chain` is a plain owned value. Drivers that append from another task
//! share it as a [`SharedChain`]; the write lock makes "read the tip, then
//! append" a single step, so concurrent producers cannot interleave.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::block::Block;
use super::error::{ChainError, ValidationError};

/// Single-writer handle for a chain driven from several tasks.
pub type SharedChain = Arc<RwLock<Chain>>;

/// Ordered chain of validated blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    /// A fresh chain holding only the genesis block.
    pub fn new() -> Self {
        Chain {
            blocks: vec![Block::genesis()],
        }
    }

    /// Rebuild a chain from a previously recorded block sequence.
    ///
    /// The sequence must start with the genesis literal and every later
    /// block must pass [`Chain::validate`] against its predecessor. Nothing
    /// is assumed about where the blocks came from.
    pub fn from_history(history: Vec<Block>) -> Result<Self, ChainError> {
        let mut blocks = history.into_iter();

        let first = blocks.next().ok_or(ChainError::EmptyHistory)?;
        if !first.is_genesis() {
            return Err(ChainError::GenesisMismatch {
                found: first.hash().to_string(),
            });
        }

        let mut chain = Chain {
            blocks: vec![first],
        };
        for (offset, block) in blocks.enumerate() {
            Self::validate(&block, chain.tip()).map_err(|source| ChainError::InvalidBlock {
                position: offset + 1,
                source,
            })?;
            chain.blocks.push(block);
        }

        debug!(height = chain.height(), "chain restored from history");
        Ok(chain)
    }

    /// Wrap this chain for sharing with a background driver.
    pub fn into_shared(self) -> SharedChain {
        Arc::new(RwLock::new(self))
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check whether `candidate` may extend a chain whose last block is `tip`.
    ///
    /// Checks, in order: height is `tip.height + 1`, `previous_hash` equals
    /// `tip.hash`, and the stored hash matches the candidate's own fields.
    /// Timestamps and payloads are not inspected. A tip at `u64::MAX` has no
    /// valid successor.
    pub fn validate(candidate: &Block, tip: &Block) -> Result<(), ValidationError> {
        let expected_height = tip.successor_height()?;
        if candidate.height() != expected_height {
            return Err(ValidationError::HeightMismatch {
                expected: expected_height,
                got: candidate.height(),
            });
        }

        if candidate.previous_hash() != tip.hash() {
            return Err(ValidationError::PreviousHashMismatch {
                expected: tip.hash().to_string(),
                got: candidate.previous_hash().to_string(),
            });
        }

        let computed = candidate.compute_hash();
        if computed != candidate.hash() {
            return Err(ValidationError::HashMismatch {
                height: candidate.height(),
                stored: candidate.hash().to_string(),
                computed,
            });
        }

        Ok(())
    }

    /// Boolean form of [`Chain::validate`].
    pub fn is_valid(candidate: &Block, tip: &Block) -> bool {
        Self::validate(candidate, tip).is_ok()
    }

    /// Re-walk the whole chain and confirm every invariant.
    pub fn verify(&self) -> Result<(), ChainError> {
        let (first, rest) = self.blocks.split_first().ok_or(ChainError::EmptyHistory)?;
        if !first.is_genesis() {
            return Err(ChainError::GenesisMismatch {
                found: first.hash().to_string(),
            });
        }

        let mut previous = first;
        for (offset, block) in rest.iter().enumerate() {
            Self::validate(block, previous).map_err(|source| ChainError::InvalidBlock {
                position: offset + 1,
                source,
            })?;
            previous = block;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Validate `candidate` against the tip and append it.
    ///
    /// On rejection the chain is untouched and the reason is returned.
    pub fn try_append(&mut self, candidate: Block) -> Result<&Block, ValidationError> {
        if let Err(reason) = Self::validate(&candidate, self.tip()) {
            warn!(
                height = candidate.height(),
                hash = %candidate.hash(),
                %reason,
                "block rejected"
            );
            return Err(reason);
        }

        debug!(
            height = candidate.height(),
            hash = %candidate.hash(),
            "block appended"
        );
        self.blocks.push(candidate);
        Ok(self.tip())
    }

    /// Append `candidate` if it validates against the tip.
    ///
    /// Returns `true` when the block was appended, `false` when it was
    /// rejected (the chain is unchanged in that case).
    pub fn append(&mut self, candidate: Block) -> bool {
        self.try_append(candidate).is_ok()
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    /// The most recently appended block.
    pub fn tip(&self) -> &Block {
        // `blocks` starts with genesis and never shrinks.
        &self.blocks[self.blocks.len() - 1]
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Block at `height`, if the chain is that tall.
    pub fn get(&self, height: u64) -> Option<&Block> {
        usize::try_from(height).ok().and_then(|i| self.blocks.get(i))
    }

    /// Number of blocks, genesis included. Never zero.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Height of the tip.
    pub fn height(&self) -> u64 {
        self.tip().height()
    }

    /// Render every block as a fixed-width table, one row per block.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>6} │ {:<16} │ {:<16} │ {:>13} │ {}\n",
            "height", "previous", "hash", "timestamp", "payload"
        ));
        out.push_str(&format!("{}\n", "─".repeat(80)));
        for block in &self.blocks {
            out.push_str(&block.to_string());
            out.push('\n');
        }
        out
    }

    /// Pretty-printed JSON array of all blocks.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.blocks)
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
