//! # Block Driver
//!
//! The periodic loop that keeps the demo chain growing: on every tick it
//! asks the producer for the tip's successor, appends it, records metrics,
//! and prints the chain to stdout.
//!
//! The driver owns nothing global. It receives a [`SharedChain`] handle and
//! a producer, and returns how many blocks it appended once it stops.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;

use linkchain_protocol::{BlockProducer, SharedChain};

use crate::metrics::NodeMetrics;

/// What the driver prints after each successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// The whole chain as a table.
    Table,
    /// Only the new tip.
    Tip,
    /// Nothing; logs only.
    Silent,
}

impl PrintMode {
    /// Mode selected by the `--quiet` and `--tip-only` flags.
    pub fn from_flags(quiet: bool, tip_only: bool) -> Self {
        match (quiet, tip_only) {
            (true, _) => PrintMode::Silent,
            (false, true) => PrintMode::Tip,
            (false, false) => PrintMode::Table,
        }
    }
}

/// Driver loop settings.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Time between produced blocks.
    pub interval: Duration,
    /// Stop after this many appended blocks. `None` runs until aborted.
    pub max_blocks: Option<u64>,
    pub print: PrintMode,
}

/// Runs the produce-and-append loop.
///
/// The first block is produced one full `interval` after start. Rejected
/// candidates are counted and dropped, never retried. Returns the number of
/// blocks appended when `max_blocks` is reached.
pub async fn run_driver<R: Rng>(
    chain: SharedChain,
    mut producer: BlockProducer<R>,
    metrics: Arc<NodeMetrics>,
    config: DriverConfig,
) -> u64 {
    let mut interval =
        tokio::time::interval_at(tokio::time::Instant::now() + config.interval, config.interval);
    let mut appended = 0u64;

    tracing::info!(
        interval_ms = config.interval.as_millis() as u64,
        max_blocks = ?config.max_blocks,
        "block driver started"
    );

    loop {
        if config.max_blocks.is_some_and(|max| appended >= max) {
            break;
        }
        interval.tick().await;

        let start = Instant::now();
        match producer.produce_and_append(&chain) {
            Ok(block) => {
                appended += 1;
                metrics
                    .block_append_seconds
                    .observe(start.elapsed().as_secs_f64());
                metrics.blocks_appended_total.inc();
                metrics.chain_height.set(block.height() as i64);

                match config.print {
                    PrintMode::Table => {
                        let table = chain.read().render_table();
                        println!("{table}");
                    }
                    PrintMode::Tip => println!("{block}"),
                    PrintMode::Silent => {}
                }
            }
            Err(e) => {
                metrics.blocks_rejected_total.inc();
                tracing::warn!(error = %e, "produced block dropped");
            }
        }
    }

    tracing::info!(appended, "block driver finished");
    appended
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkchain_protocol::Chain;

    fn test_config(max_blocks: u64) -> DriverConfig {
        DriverConfig {
            interval: Duration::from_millis(1),
            max_blocks: Some(max_blocks),
            print: PrintMode::Silent,
        }
    }

    #[tokio::test]
    async fn driver_appends_requested_blocks() {
        let chain = Chain::new().into_shared();
        let metrics = Arc::new(NodeMetrics::new().expect("metrics"));

        let appended = run_driver(
            Arc::clone(&chain),
            BlockProducer::seeded(5),
            Arc::clone(&metrics),
            test_config(5),
        )
        .await;

        assert_eq!(appended, 5);
        let chain = chain.read();
        assert_eq!(chain.len(), 6);
        assert!(chain.verify().is_ok());
        assert_eq!(metrics.blocks_appended_total.get(), 5);
        assert_eq!(metrics.blocks_rejected_total.get(), 0);
        assert_eq!(metrics.chain_height.get(), 5);
    }

    #[test]
    fn print_mode_flags() {
        assert_eq!(PrintMode::from_flags(false, false), PrintMode::Table);
        assert_eq!(PrintMode::from_flags(false, true), PrintMode::Tip);
        assert_eq!(PrintMode::from_flags(true, false), PrintMode::Silent);
    }

    #[tokio::test(start_paused = true)]
    async fn first_block_waits_one_interval() {
        let chain = Chain::new().into_shared();
        let metrics = Arc::new(NodeMetrics::new().expect("metrics"));
        let config = DriverConfig {
            interval: Duration::from_secs(2),
            max_blocks: Some(1),
            print: PrintMode::Silent,
        };

        let started = tokio::time::Instant::now();
        let handle = tokio::spawn(run_driver(
            Arc::clone(&chain),
            BlockProducer::seeded(3),
            metrics,
            config,
        ));

        tokio::time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(chain.read().len(), 1);

        assert_eq!(handle.await.expect("driver task"), 1);
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(chain.read().len(), 2);
    }

    #[tokio::test]
    async fn driver_with_zero_max_does_nothing() {
        let chain = Chain::new().into_shared();
        let metrics = Arc::new(NodeMetrics::new().expect("metrics"));

        let appended = run_driver(
            Arc::clone(&chain),
            BlockProducer::seeded(5),
            metrics,
            test_config(0),
        )
        .await;

        assert_eq!(appended, 0);
        assert_eq!(chain.read().len(), 1);
    }

    #[tokio::test]
    async fn driver_continues_restored_chain() {
        let mut seed_chain = Chain::new();
        let mut producer = BlockProducer::seeded(9);
        for _ in 0..3 {
            let block = producer.produce(&seed_chain).unwrap();
            assert!(seed_chain.append(block));
        }
        let restored = Chain::from_history(seed_chain.blocks().to_vec()).expect("restore");
        let chain = restored.into_shared();
        let metrics = Arc::new(NodeMetrics::new().expect("metrics"));

        run_driver(
            Arc::clone(&chain),
            BlockProducer::seeded(10),
            Arc::clone(&metrics),
            test_config(2),
        )
        .await;

        assert_eq!(chain.read().height(), 5);
        assert_eq!(metrics.chain_height.get(), 5);
    }
}
