//! # Cryptographic Primitives
//!
//! Just hashing. Blocks carry no signatures and there is no proof-of-work,
//! so the only primitive the ledger needs is a collision-resistant digest
//! to link each block to its predecessor.

pub mod hash;

pub use hash::{compute_hash, sha256, sha256_hex};
