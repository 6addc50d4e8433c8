// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # linkchain Node
//!
//! Entry point for the `linkchain-node` binary. Parses CLI arguments,
//! initializes logging and metrics, builds the chain, and runs the block
//! driver until it reaches `--max-blocks` or a shutdown signal arrives.
//!
//! The binary supports four subcommands:
//!
//! - `run`: grow a chain on a timer and print it
//! - `hash`: compute a block hash from its fields
//! - `genesis`: print the genesis block
//! - `version`: print build version information

mod cli;
mod driver;
mod logging;
mod metrics;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;

use linkchain_protocol::{compute_hash, Block, BlockProducer, Chain};

use cli::{Commands, LinkchainCli};
use driver::{DriverConfig, PrintMode};
use metrics::NodeMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = LinkchainCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Hash(args) => {
            println!(
                "{}",
                compute_hash(args.height, &args.previous_hash, args.timestamp, &args.payload)
            );
            Ok(())
        }
        Commands::Genesis => {
            let json = serde_json::to_string_pretty(&Block::genesis())
                .context("failed to serialize genesis block")?;
            println!("{json}");
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Builds the chain and drives block production until stopped.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(logging::DEFAULT_FILTER, args.log_format);

    tracing::info!(
        interval_ms = args.interval_ms,
        max_blocks = ?args.max_blocks,
        history = ?args.history,
        "starting linkchain-node"
    );

    // --- Chain ---
    let chain = match &args.history {
        Some(path) => load_history(path)?,
        None => Chain::new(),
    };
    tracing::info!(
        height = chain.height(),
        tip = %chain.tip().hash(),
        "chain ready"
    );
    print!("{}", chain.render_table());
    let chain = chain.into_shared();

    // --- Metrics ---
    let node_metrics =
        Arc::new(NodeMetrics::new().context("failed to register prometheus metrics")?);
    node_metrics.chain_height.set(chain.read().height() as i64);

    let metrics_server = match args.metrics_port {
        Some(port) => {
            let addr = format!("0.0.0.0:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind metrics listener on {addr}"))?;
            tracing::info!("Metrics server listening on {}", addr);

            let router = metrics::metrics_router(Arc::clone(&node_metrics));
            Some(tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, router).await {
                    tracing::error!("Metrics server error: {}", e);
                }
            }))
        }
        None => None,
    };

    // --- Block driver ---
    let producer = match args.seed {
        Some(seed) => BlockProducer::seeded(seed),
        None => BlockProducer::new(),
    };
    let config = DriverConfig {
        interval: Duration::from_millis(args.interval_ms.max(1)),
        max_blocks: args.max_blocks,
        print: PrintMode::from_flags(args.quiet, args.tip_only),
    };
    let mut block_loop = tokio::spawn(driver::run_driver(
        Arc::clone(&chain),
        producer,
        Arc::clone(&node_metrics),
        config,
    ));

    tokio::select! {
        res = &mut block_loop => {
            let appended = res.context("block driver panicked")?;
            tracing::info!(appended, "block limit reached");
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
            block_loop.abort();
        }
    }

    if let Some(server) = metrics_server {
        server.abort();
    }

    let chain = chain.read();
    if let Err(e) = chain.verify() {
        // Unreachable through the public API; logged in case it ever isn't.
        tracing::error!(error = %e, "chain failed final verification");
    }
    if args.dump_json {
        println!("{}", chain.to_json().context("failed to serialize chain")?);
    }

    tracing::info!(
        height = chain.height(),
        tip = %chain.tip().hash(),
        "linkchain-node stopped"
    );
    Ok(())
}

/// Reads a JSON array of blocks and replays it into a chain.
fn load_history(path: &Path) -> Result<Chain> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    let blocks: Vec<Block> = serde_json::from_str(&raw)
        .with_context(|| format!("history file {} is not a block array", path.display()))?;
    let count = blocks.len();
    let chain = Chain::from_history(blocks)
        .with_context(|| format!("history file {} is not a valid chain", path.display()))?;

    tracing::info!(path = %path.display(), blocks = count, "history restored");
    Ok(chain)
}

/// Prints version information to stdout.
fn print_version() {
    println!("linkchain-node {}", env!("CARGO_PKG_VERSION"));
    println!(
        "protocol       {} ({})",
        linkchain_protocol::config::PROTOCOL_VERSION,
        linkchain_protocol::config::HASH_FUNCTION,
    );
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
