//! One-shot host sampling.
//!
//! A [`Sampler`] turns the raw readings of a [`MetricsSource`] into a
//! [`Sample`]: rounded percentages, aggregate network counters, and the
//! busiest processes. Every call measures afresh; nothing is cached.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::collectors::NetworkCounters;
use crate::config::{
    Config, DEFAULT_FALLBACK_DISK_PATH, DEFAULT_PRIMARY_DISK_PATH, DEFAULT_TOP_PROCESSES,
};
use crate::error::CollectError;
use crate::source::MetricsSource;

/// Window over which system CPU utilization is measured.
///
/// Each sample blocks for this long; a shorter window would report a
/// misleading instantaneous value.
pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Per-process details as reported in `top_processes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu: f64,
    pub mem: f64,
}

/// A point-in-time snapshot of host utilization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "cpu")]
    pub cpu_percent: f64,
    #[serde(rename = "memory")]
    pub memory_percent: f64,
    #[serde(rename = "disk")]
    pub disk_percent: f64,
    #[serde(rename = "net")]
    pub network_counters: NetworkCounters,
    #[serde(rename = "top_processes")]
    pub processes: Vec<ProcessInfo>,
    /// Seconds since the Unix epoch at collection time.
    pub timestamp: f64,
}

/// Sampler settings derived from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerSettings {
    pub primary_disk_path: PathBuf,
    pub fallback_disk_path: PathBuf,
    pub top_processes: usize,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            primary_disk_path: PathBuf::from(DEFAULT_PRIMARY_DISK_PATH),
            fallback_disk_path: PathBuf::from(DEFAULT_FALLBACK_DISK_PATH),
            top_processes: DEFAULT_TOP_PROCESSES,
        }
    }
}

impl From<&Config> for SamplerSettings {
    fn from(cfg: &Config) -> Self {
        let defaults = SamplerSettings::default();
        Self {
            primary_disk_path: cfg
                .primary_disk_path
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or(defaults.primary_disk_path),
            fallback_disk_path: cfg
                .fallback_disk_path
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or(defaults.fallback_disk_path),
            top_processes: cfg.top_processes.unwrap_or(defaults.top_processes),
        }
    }
}

/// Produces [`Sample`]s from a [`MetricsSource`].
#[derive(Clone)]
pub struct Sampler {
    source: Arc<dyn MetricsSource>,
    settings: SamplerSettings,
}

impl Sampler {
    pub fn new(source: Arc<dyn MetricsSource>, settings: SamplerSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &SamplerSettings {
        &self.settings
    }

    /// System CPU percent over [`CPU_SAMPLE_INTERVAL`]. Blocks the calling thread.
    pub fn collect_cpu(&self) -> Result<f64, CollectError> {
        let cpu = self.source.cpu_percent(CPU_SAMPLE_INTERVAL)?;
        Ok(round_to(cpu.clamp(0.0, 100.0), 1))
    }

    pub fn collect_memory(&self) -> Result<f64, CollectError> {
        let mem = self.source.memory_percent()?;
        Ok(round_to(mem.clamp(0.0, 100.0), 1))
    }

    /// Disk percent of the primary path, or of the fallback path when the
    /// primary cannot be read.
    pub fn collect_disk(&self) -> Result<f64, CollectError> {
        let primary = &self.settings.primary_disk_path;
        let fallback = &self.settings.fallback_disk_path;

        let percent = match self.source.disk_percent(primary) {
            Ok(p) => p,
            Err(e) => {
                // Expected on hosts without the primary drive; not an error yet.
                debug!("Primary disk path {} unavailable: {}", primary.display(), e);
                self.source.disk_percent(fallback).map_err(|e| {
                    warn!("Fallback disk path {} unavailable: {}", fallback.display(), e);
                    CollectError::DiskUnavailable {
                        primary: display(primary),
                        fallback: display(fallback),
                    }
                })?
            }
        };

        Ok(round_to(percent.clamp(0.0, 100.0), 1))
    }

    pub fn collect_network(&self) -> Result<NetworkCounters, CollectError> {
        self.source.network_counters()
    }

    /// The `limit` busiest processes, sorted by CPU descending.
    ///
    /// Processes whose details cannot be read are skipped. Equal CPU values
    /// keep the order the source enumerated them in.
    pub fn collect_top_processes(&self, limit: usize) -> Vec<ProcessInfo> {
        let mut procs: Vec<ProcessInfo> = self
            .source
            .processes()
            .into_iter()
            .filter_map(|result| match result {
                Ok(mut info) => {
                    info.cpu = round_to(info.cpu, 2);
                    info.mem = round_to(info.mem, 2);
                    Some(info)
                }
                Err(e) => {
                    // Exited mid-scan or not readable; leave it out.
                    debug!("Skipping process: {}", e);
                    None
                }
            })
            .collect();

        // sort_by is stable, so ties stay in enumeration order
        procs.sort_by(|a, b| b.cpu.total_cmp(&a.cpu));
        procs.truncate(limit);
        procs
    }

    /// Collects one full [`Sample`]. Blocks for at least [`CPU_SAMPLE_INTERVAL`].
    pub fn sample(&self) -> Result<Sample, CollectError> {
        let cpu_percent = self.collect_cpu()?;
        let memory_percent = self.collect_memory()?;
        let disk_percent = self.collect_disk()?;
        let network_counters = self.collect_network()?;
        let processes = self.collect_top_processes(self.settings.top_processes);

        Ok(Sample {
            cpu_percent,
            memory_percent,
            disk_percent,
            network_counters,
            processes,
            timestamp: unix_timestamp(),
        })
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Seconds since the Unix epoch with microsecond precision.
pub fn unix_timestamp() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Rounds `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
