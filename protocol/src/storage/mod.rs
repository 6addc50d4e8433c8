//! # Storage Module
//!
//! The in-memory ledger: blocks, the chain that orders them, and the errors
//! raised when a block or a history fails validation.
//!
//! ## Architecture
//!
//! ```text
//! block.rs: Block structure, genesis literal, successor construction
//! chain.rs: Append-only chain with validation, restore and views
//! error.rs: ValidationError / ChainError
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! BlockProducer ─► Block::next(tip) ─► Chain::append ─► Chain::validate
//!                                           │
//!                                           └─► blocks.push (only on Ok)
//! ```
//!
//! Nothing here touches the disk. A chain lives as long as the value that
//! owns it.

pub mod block;
pub mod chain;
pub mod error;

pub use block::Block;
pub use chain::{Chain, SharedChain};
pub use error::{ChainError, ValidationError};
