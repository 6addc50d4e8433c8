//! # Logging
//!
//! `tracing` setup for the node. Stdout carries the chain itself (the block
//! table, tip rows, the `--dump-json` output), so every log line goes to
//! stderr and the two streams can be redirected independently.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "linkchain_node=info,linkchain_protocol=info";

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored, one event per line with source location.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Installs the global subscriber. Must run once, before the first event.
///
/// `RUST_LOG` wins over `default_filter`, so block-level detail is one
/// variable away:
///
/// ```text
/// RUST_LOG=linkchain_protocol=debug linkchain-node run
/// ```
pub fn init_logging(default_filter: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    tracing::debug!(?format, "logging ready");
}
