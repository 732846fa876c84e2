//! JSON stats endpoint handler.
//!
//! `/api/stats` takes a fresh sample on every call (blocking for the CPU
//! window on a blocking-pool thread), records its percentages into the
//! gauges, and returns it as JSON.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::CollectError;
use crate::sampler::Sample;
use crate::state::SharedState;

/// Error type for stats endpoint failures.
#[derive(Debug)]
pub enum StatsError {
    Collection(CollectError),
    TaskFailed,
}

impl IntoResponse for StatsError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            StatsError::Collection(e) => error!("System statistics collection failed: {}", e),
            StatsError::TaskFailed => error!("Sampling task panicked or was cancelled"),
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to collect system statistics",
        )
            .into_response()
    }
}

/// Handler for the /api/stats endpoint.
#[instrument(skip(state))]
pub async fn stats_handler(State(state): State<SharedState>) -> Result<Json<Sample>, StatsError> {
    let start = Instant::now();
    debug!("Processing /api/stats request");

    let worker = state.clone();
    let sample = tokio::task::spawn_blocking(move || worker.sampler.sample())
        .await
        .map_err(|_| StatsError::TaskFailed)?
        .map_err(StatsError::Collection)?;

    state.gauges.record_sample(&sample);

    debug!(
        "Collected stats in {:.1}ms (cpu={} memory={} disk={} processes={})",
        start.elapsed().as_secs_f64() * 1000.0,
        sample.cpu_percent,
        sample.memory_percent,
        sample.disk_percent,
        sample.processes.len()
    );

    Ok(Json(sample))
}
