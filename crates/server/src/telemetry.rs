//! Prometheus wiring for the matching core.
//!
//! [`install`] registers the global `metrics` recorder and hooks
//! [`PrometheusMatchMetrics`] into the matcher so every ranking run emits the
//! `heallink_match_*` series.

use std::sync::Arc;
use std::time::Duration;

use matcher::{set_match_metrics, MatchMetrics};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Forwards ranking outcomes to the `metrics` facade.
#[derive(Debug, Default)]
pub struct PrometheusMatchMetrics;

impl MatchMetrics for PrometheusMatchMetrics {
    fn record_match(&self, pool_size: usize, hit_count: usize, latency: Duration) {
        metrics::counter!("heallink_match_requests_total").increment(1);
        if hit_count == 0 {
            metrics::counter!("heallink_match_empty_total").increment(1);
        }
        metrics::histogram!("heallink_match_latency_seconds").record(latency.as_secs_f64());
        metrics::histogram!("heallink_match_pool_size").record(pool_size as f64);
        metrics::histogram!("heallink_match_hits").record(hit_count as f64);
    }
}

/// Install the Prometheus recorder and the match metrics hook.
///
/// Fails if a global recorder is already installed.
pub fn install() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    set_match_metrics(Some(Arc::new(PrometheusMatchMetrics)));
    Ok(handle)
}
