//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hostmon_exporter::{
    build_router, AppState, CollectError, Config, GaugeState, MetricsSource, NetworkCounters,
    ProcessInfo, Sampler, SamplerSettings,
};

pub const HOSTNAME: &str = "test-host-7";

/// Fixed readings standing in for the operating system.
#[derive(Clone)]
pub struct FakeSource {
    pub cpu: f64,
    pub memory: f64,
    /// Readable disk paths and their usage; any other path fails.
    pub disks: HashMap<PathBuf, f64>,
    pub net: NetworkCounters,
    /// `Err(pid)` entries model processes that exit mid-scan.
    pub processes: Vec<Result<ProcessInfo, u32>>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            cpu: 23.4,
            memory: 51.2,
            disks: HashMap::from([(PathBuf::from("/"), 67.8)]),
            net: NetworkCounters {
                bytes_sent: 1_000,
                bytes_recv: 2_000,
                packets_sent: 10,
                packets_recv: 20,
                errin: 0,
                errout: 1,
                dropin: 2,
                dropout: 0,
            },
            processes: vec![
                Ok(process(1, "init", 0.1, 0.5)),
                Ok(process(200, "postgres", 12.75, 8.0)),
                Ok(process(300, "nginx", 3.0, 1.25)),
            ],
        }
    }
}

impl MetricsSource for FakeSource {
    fn cpu_percent(&self, _interval: Duration) -> Result<f64, CollectError> {
        Ok(self.cpu)
    }

    fn memory_percent(&self) -> Result<f64, CollectError> {
        Ok(self.memory)
    }

    fn disk_percent(&self, path: &Path) -> Result<f64, CollectError> {
        self.disks
            .get(path)
            .copied()
            .ok_or_else(|| CollectError::Statvfs {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }

    fn network_counters(&self) -> Result<NetworkCounters, CollectError> {
        Ok(self.net)
    }

    fn processes(&self) -> Vec<Result<ProcessInfo, CollectError>> {
        self.processes
            .iter()
            .map(|p| match p {
                Ok(info) => Ok(info.clone()),
                Err(pid) => Err(CollectError::ProcessGone { pid: *pid }),
            })
            .collect()
    }
}

pub fn process(pid: u32, name: &str, cpu: f64, mem: f64) -> ProcessInfo {
    ProcessInfo {
        pid,
        name: name.to_string(),
        cpu,
        mem,
    }
}

/// Builds shared state around `source` with default sampler settings.
pub fn state_with(source: FakeSource) -> Arc<AppState> {
    let sampler = Sampler::new(Arc::new(source), SamplerSettings::default());
    let gauges = GaugeState::new().expect("gauge registration");
    Arc::new(AppState::new(sampler, gauges, HOSTNAME, Config::default()))
}

pub fn app_with(source: FakeSource) -> Router {
    build_router(state_with(source))
}
