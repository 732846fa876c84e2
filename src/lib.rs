//! hostmon-exporter library
//!
//! Point-in-time host utilization (CPU, memory, disk, network counters and
//! the busiest processes) served over HTTP as a live dashboard, as JSON, and
//! as Prometheus gauges.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use hostmon_exporter::{GaugeState, ProcfsSource, Sampler, SamplerSettings};
//!
//! let sampler = Sampler::new(Arc::new(ProcfsSource::default()), SamplerSettings::default());
//! let gauges = GaugeState::new().expect("gauge registration");
//!
//! // Blocks for about one second while CPU usage is measured
//! let sample = sampler.sample().expect("collection failed");
//! gauges.record_sample(&sample);
//!
//! println!("cpu={} memory={} disk={}", sample.cpu_percent, sample.memory_percent, sample.disk_percent);
//! print!("{}", gauges.encode().expect("encoding failed"));
//! ```

pub mod cli;
pub mod collectors;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod process;
pub mod sampler;
pub mod source;
pub mod startup_checks;
pub mod state;
pub mod system;

// Re-export main types for convenience
pub use collectors::NetworkCounters;
pub use config::Config;
pub use error::CollectError;
pub use handlers::build_router;
pub use metrics::GaugeState;
pub use sampler::{ProcessInfo, Sample, Sampler, SamplerSettings, CPU_SAMPLE_INTERVAL};
pub use source::{MetricsSource, ProcfsSource};
pub use state::{AppState, SharedState};
