//! # Block Producer
//!
//! Synthesizes candidate blocks for the demo driver. This is scaffolding
//! around the ledger, not part of it: the chain accepts blocks from anyone,
//! and the producer is just one well-behaved source of them.
//!
//! ## Pipeline
//!
//! ```text
//! 1. READ: Take the current tip
//! 2. PICK: Choose a payload uniformly from the pool
//! 3. STAMP: Wall-clock time in milliseconds
//! 4. BUILD: Block::next(tip, timestamp, payload)
//! 5. APPEND: Chain::try_append (only in `produce_and_append`)
//! ```
//!
//! ## Thread Safety
//!
//! `produce_and_append` holds the [`SharedChain`] write lock across steps 1
//! to 5. Two producers racing on the same chain therefore never build on
//! the same tip.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

use crate::config::SAMPLE_PAYLOADS;
use crate::storage::{Block, Chain, SharedChain, ValidationError};

/// Errors from the production pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    /// A producer needs at least one payload to pick from.
    #[error("payload pool is empty")]
    EmptyPayloadPool,

    /// The freshly built block could not extend the tip.
    #[error("produced block rejected: {0}")]
    Rejected(#[from] ValidationError),
}

/// Builds successors of a chain's tip with random payloads.
#[derive(Debug)]
pub struct BlockProducer<R = StdRng> {
    rng: R,
    payloads: Vec<String>,
}

impl BlockProducer<StdRng> {
    /// Producer seeded from OS entropy, drawing from [`SAMPLE_PAYLOADS`].
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic producer for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for BlockProducer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BlockProducer<R> {
    /// Producer over a caller-supplied RNG, drawing from [`SAMPLE_PAYLOADS`].
    pub fn with_rng(rng: R) -> Self {
        BlockProducer {
            rng,
            payloads: SAMPLE_PAYLOADS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Replace the payload pool.
    pub fn with_payloads<I, S>(mut self, payloads: I) -> Result<Self, ProducerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let payloads: Vec<String> = payloads.into_iter().map(Into::into).collect();
        if payloads.is_empty() {
            return Err(ProducerError::EmptyPayloadPool);
        }
        self.payloads = payloads;
        Ok(self)
    }

    /// The payloads this producer picks from.
    pub fn payloads(&self) -> &[String] {
        &self.payloads
    }

    /// Pick one payload uniformly at random.
    pub fn next_payload(&mut self) -> String {
        // `with_payloads` refuses an empty pool and the default pool is
        // non-empty, so `choose` always yields.
        self.payloads
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    /// Build the successor of `chain`'s tip stamped with `timestamp`.
    pub fn produce_at(&mut self, chain: &Chain, timestamp: u64) -> Result<Block, ProducerError> {
        let payload = self.next_payload();
        Ok(Block::next(chain.tip(), timestamp, payload)?)
    }

    /// Build the successor of `chain`'s tip stamped with the current time.
    pub fn produce(&mut self, chain: &Chain) -> Result<Block, ProducerError> {
        self.produce_at(chain, now_millis())
    }

    /// Produce a block and append it while holding the write lock.
    pub fn produce_and_append(&mut self, chain: &SharedChain) -> Result<Block, ProducerError> {
        let mut guard = chain.write();
        let candidate = self.produce(&guard)?;
        guard.try_append(candidate.clone())?;

        info!(
            height = candidate.height(),
            hash = %candidate.hash(),
            payload = %candidate.payload(),
            "block produced"
        );
        Ok(candidate)
    }
}

/// Milliseconds since the Unix epoch. Clocks before 1970 read as 0.
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
