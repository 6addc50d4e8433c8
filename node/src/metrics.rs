//! # Prometheus Metrics
//!
//! Operational counters for the block driver. Scraped at `/metrics` when the
//! node runs with `--metrics-port`.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so they
//! do not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
///
/// Clone-friendly (prometheus handles are `Arc`s internally) so it can be
/// shared between the driver task and the metrics server.
#[derive(Clone)]
pub struct NodeMetrics {
    registry: Registry,
    /// Blocks accepted by the chain.
    pub blocks_appended_total: IntCounter,
    /// Candidates the chain refused.
    pub blocks_rejected_total: IntCounter,
    /// Height of the current tip.
    pub chain_height: IntGauge,
    /// Time to produce, validate and append one block, in seconds.
    pub block_append_seconds: Histogram,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("linkchain".into()), None)?;

        let blocks_appended_total = IntCounter::new(
            "blocks_appended_total",
            "Total number of blocks appended to the chain",
        )?;
        registry.register(Box::new(blocks_appended_total.clone()))?;

        let blocks_rejected_total = IntCounter::new(
            "blocks_rejected_total",
            "Total number of candidate blocks rejected by validation",
        )?;
        registry.register(Box::new(blocks_rejected_total.clone()))?;

        let chain_height = IntGauge::new("chain_height", "Height of the chain tip")?;
        registry.register(Box::new(chain_height.clone()))?;

        let block_append_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "block_append_seconds",
                "Time to produce, validate and append a block in seconds",
            )
            .buckets(vec![
                0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1,
            ]),
        )?;
        registry.register(Box::new(block_append_seconds.clone()))?;

        Ok(Self {
            registry,
            blocks_appended_total,
            blocks_rejected_total,
            chain_height,
            block_append_seconds,
        })
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Router exposing `GET /metrics`.
pub fn metrics_router(metrics: SharedMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
