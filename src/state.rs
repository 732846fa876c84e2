//! Application state management for the exporter.
//!
//! This module defines the shared application state that is passed
//! to HTTP handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::metrics::GaugeState;
use crate::sampler::Sampler;

/// Type alias for shared application state.
pub type SharedState = Arc<AppState>;

/// State shared across requests.
pub struct AppState {
    /// Builds a fresh sample for every `/api/stats` request.
    pub sampler: Sampler,
    /// Written by `/api/stats`, read by `/metrics`.
    pub gauges: GaugeState,
    /// Host name shown on the dashboard.
    pub hostname: String,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        sampler: Sampler,
        gauges: GaugeState,
        hostname: impl Into<String>,
        config: Config,
    ) -> Self {
        Self {
            sampler,
            gauges,
            hostname: hostname.into(),
            config: Arc::new(config),
        }
    }
}
