//! # CLI Interface
//!
//! Defines the command-line argument structure for `linkchain-node` using
//! `clap` derive. Supports four subcommands: `run`, `hash`, `genesis`,
//! and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use linkchain_protocol::config::BLOCK_TIME_MS;

use crate::logging::LogFormat;

/// linkchain demo node.
///
/// Builds an in-memory hash-linked chain and appends a randomly generated
/// block every interval, printing the chain as it grows.
#[derive(Parser, Debug)]
#[command(
    name = "linkchain-node",
    about = "linkchain demo node",
    version,
    propagate_version = true
)]
pub struct LinkchainCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start producing blocks on a fresh (or restored) chain.
    Run(RunArgs),
    /// Compute the block hash for the given fields and print it.
    Hash(HashArgs),
    /// Print the genesis block as JSON.
    Genesis,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// JSON file holding a previously dumped chain to continue from.
    ///
    /// The file is only read. Without it the node starts from genesis.
    #[arg(long, env = "LINKCHAIN_HISTORY")]
    pub history: Option<PathBuf>,

    /// Milliseconds between produced blocks.
    #[arg(long, env = "LINKCHAIN_INTERVAL_MS", default_value_t = BLOCK_TIME_MS)]
    pub interval_ms: u64,

    /// Stop after appending this many blocks. Runs until Ctrl+C when omitted.
    #[arg(long, env = "LINKCHAIN_MAX_BLOCKS")]
    pub max_blocks: Option<u64>,

    /// Seed for the payload RNG, for reproducible runs.
    #[arg(long, env = "LINKCHAIN_SEED")]
    pub seed: Option<u64>,

    /// Log output format.
    #[arg(long, env = "LINKCHAIN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this port. Disabled when omitted.
    #[arg(long, env = "LINKCHAIN_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Print only the new tip after each append instead of the whole table.
    #[arg(long, conflicts_with = "quiet")]
    pub tip_only: bool,

    /// Print nothing per block; progress is visible in the logs only.
    #[arg(long, short)]
    pub quiet: bool,

    /// Print the final chain as JSON on exit.
    #[arg(long)]
    pub dump_json: bool,
}

/// Arguments for the `hash` subcommand.
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// Block height.
    pub height: u64,
    /// Hash of the preceding block.
    pub previous_hash: String,
    /// Timestamp in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Block payload.
    pub payload: String,
}
