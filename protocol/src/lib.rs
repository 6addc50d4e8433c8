// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # linkchain: Core Library
//!
//! A hash-linked block ledger small enough to read in one sitting. Every
//! block commits to its predecessor's hash, so rewriting any block breaks
//! the link to every block after it.
//!
//! There is no networking, no consensus, no proof-of-work and no disk. What
//! is left is the part that makes a chain a chain: a fixed genesis, a hash
//! function, and a validity rule that gates every append.
//!
//! ## Architecture
//!
//! - **crypto**: SHA-256 and the block hash preimage layout.
//! - **storage**: `Block`, `Chain`, and their error types.
//! - **producer**: Random candidate generation for the demo driver.
//! - **config**: Genesis literals and driver constants.
//!
//! ## Example
//!
//! ```
//! use linkchain_protocol::{Block, Chain};
//!
//! let mut chain = Chain::new();
//! let genesis_hash = chain.tip().hash().to_string();
//!
//! let a = Block::next(chain.tip(), 1_700_000_000_000, "x").unwrap();
//! assert!(chain.append(a.clone()));
//! assert_eq!(chain.tip(), &a);
//!
//! let forged = Block::new(1, genesis_hash, 1_700_000_000_000, "x", "deadbeef");
//! assert!(!chain.append(forged));
//! assert_eq!(chain.len(), 2);
//! ```

pub mod config;
pub mod crypto;
pub mod producer;
pub mod storage;

pub use crypto::compute_hash;
pub use producer::{BlockProducer, ProducerError};
pub use storage::{Block, Chain, ChainError, SharedChain, ValidationError};
