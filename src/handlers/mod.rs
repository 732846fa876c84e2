//! HTTP endpoint handlers for the exporter.
//!
//! This module provides handlers for all HTTP endpoints:
//! - `/`: Live dashboard page
//! - `/api/stats`: Fresh JSON sample
//! - `/metrics`: Prometheus gauges from the last sample

use axum::{routing::get, Router};

use crate::state::SharedState;

pub mod metrics;
pub mod root;
pub mod stats;

// Re-export handlers
pub use metrics::metrics_handler;
pub use root::root_handler;
pub use stats::stats_handler;

/// Builds the router serving all endpoints.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/stats", get(stats_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
