// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Logs and Prometheus metrics for the node.
//!
//! Every metric the node emits is named here and recorded through the
//! helpers below, so `/metrics` and the describe block cannot drift apart.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const QUERIES_TOTAL: &str = "por_queries_total";
pub const QUERY_DURATION_SECONDS: &str = "por_query_duration_seconds";
pub const SNAPSHOT_USERS: &str = "por_snapshot_users";
pub const NODE_UP: &str = "por_node_up";

const DEFAULT_FILTER: &str = "por_node=debug,por_kernel=info,tower_http=debug";

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the tracing subscriber and the Prometheus recorder.
///
/// `RUST_LOG` overrides the default filter. A recorder that cannot be
/// installed only disables `/metrics`; the node keeps serving.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("prometheus handle already set");
            }
        }
        Err(e) => tracing::warn!("prometheus recorder not installed: {}", e),
    }

    metrics::describe_counter!(QUERIES_TOTAL, "Proof queries answered, by outcome");
    metrics::describe_histogram!(QUERY_DURATION_SECONDS, "Time to resolve one proof query");
    metrics::describe_gauge!(SNAPSHOT_USERS, "Users committed in the loaded snapshot");
    metrics::describe_gauge!(NODE_UP, "Set to 1 while the node is serving");
}

/// One resolved `/por` query.
pub fn record_query(outcome: &'static str, elapsed: Duration) {
    metrics::histogram!(QUERY_DURATION_SECONDS, elapsed.as_secs_f64());
    metrics::increment_counter!(QUERIES_TOTAL, "outcome" => outcome);
}

/// Snapshot is loaded and the node is about to serve.
pub fn record_snapshot(users: u64) {
    metrics::gauge!(SNAPSHOT_USERS, users as f64);
    metrics::gauge!(NODE_UP, 1.0);
}

/// Prometheus text exposition, or a comment line if no recorder is installed.
pub fn get_metrics() -> String {
    match PROM_HANDLE.get() {
        Some(handle) => handle.render(),
        None => "# metrics not initialized\n".to_string(),
    }
}
