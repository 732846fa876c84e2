//! Host metrics sources.
//!
//! [`MetricsSource`] is the seam between the [`Sampler`](crate::sampler::Sampler)
//! and the operating system. [`ProcfsSource`] reads a proc filesystem and
//! statvfs; tests substitute their own implementation.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::collectors::{read_filesystem_usage, read_network_counters, NetworkCounters};
use crate::error::CollectError;
use crate::process::{collect_proc_entries, read_cpu_times, read_process_name, read_rss_bytes};
use crate::sampler::ProcessInfo;
use crate::system::{read_cpu_stat, read_memory_info, read_uptime};

/// Raw, unrounded host readings.
pub trait MetricsSource: Send + Sync {
    /// System-wide CPU percent measured across `interval`. Blocks for `interval`.
    fn cpu_percent(&self, interval: Duration) -> Result<f64, CollectError>;

    /// Percent of physical memory in use.
    fn memory_percent(&self) -> Result<f64, CollectError>;

    /// Percent used of the filesystem holding `path`.
    fn disk_percent(&self, path: &Path) -> Result<f64, CollectError>;

    /// Counters summed over all network interfaces.
    fn network_counters(&self) -> Result<NetworkCounters, CollectError>;

    /// One entry per enumerated process; an `Err` marks a process whose
    /// details could not be read.
    fn processes(&self) -> Vec<Result<ProcessInfo, CollectError>>;
}

/// Reads metrics from a proc filesystem rooted at `proc_root`.
#[derive(Debug, Clone)]
pub struct ProcfsSource {
    proc_root: PathBuf,
}

impl ProcfsSource {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    fn read_process(
        &self,
        pid: u32,
        proc_path: &Path,
        uptime_seconds: f64,
        mem_total_bytes: u64,
    ) -> Result<ProcessInfo, CollectError> {
        let gone = |e: std::io::Error| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CollectError::ProcessGone { pid }
            } else {
                CollectError::io(proc_path, e)
            }
        };

        let times = read_cpu_times(proc_path).map_err(gone)?;
        let rss_bytes = read_rss_bytes(proc_path).map_err(gone)?;
        let name = read_process_name(proc_path).unwrap_or_default();

        let mem = if mem_total_bytes == 0 {
            0.0
        } else {
            rss_bytes as f64 / mem_total_bytes as f64 * 100.0
        };

        Ok(ProcessInfo {
            pid,
            name,
            cpu: times.lifetime_percent(uptime_seconds),
            mem,
        })
    }
}

impl Default for ProcfsSource {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl MetricsSource for ProcfsSource {
    fn cpu_percent(&self, interval: Duration) -> Result<f64, CollectError> {
        let before = read_cpu_stat(&self.proc_root)?;
        thread::sleep(interval);
        let after = read_cpu_stat(&self.proc_root)?;
        Ok(after.busy_percent_since(&before))
    }

    fn memory_percent(&self) -> Result<f64, CollectError> {
        Ok(read_memory_info(&self.proc_root)?.used_percent())
    }

    fn disk_percent(&self, path: &Path) -> Result<f64, CollectError> {
        Ok(read_filesystem_usage(path)?.used_percent())
    }

    fn network_counters(&self) -> Result<NetworkCounters, CollectError> {
        read_network_counters(&self.proc_root)
    }

    fn processes(&self) -> Vec<Result<ProcessInfo, CollectError>> {
        let entries = collect_proc_entries(&self.proc_root);

        let context = read_uptime(&self.proc_root).and_then(|uptime| {
            read_memory_info(&self.proc_root).map(|mem| (uptime, mem.total_bytes))
        });
        let (uptime, mem_total) = match context {
            Ok(v) => v,
            Err(e) => {
                debug!("Cannot read process context: {}", e);
                return Vec::new();
            }
        };

        entries
            .iter()
            .map(|entry| self.read_process(entry.pid, &entry.proc_path, uptime, mem_total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{CLK_TCK, PAGE_SIZE};
    use tempfile::{tempdir, TempDir};

    fn stat_line(pid: u32, comm: &str, utime: u64, starttime: u64) -> String {
        format!(
            "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194304 100 0 0 0 {utime} 0 0 0 20 0 1 0 {starttime} 12345678 1234 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0"
        )
    }

    fn fake_proc() -> TempDir {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        std::fs::write(root.join("uptime"), "200.00 100.00\n").unwrap();
        std::fs::write(
            root.join("meminfo"),
            "MemTotal:    1048576 kB\nMemAvailable: 524288 kB\n",
        )
        .unwrap();
        std::fs::write(root.join("stat"), "cpu  10 0 10 80 0 0 0 0\n").unwrap();
        dir
    }

    fn add_process(root: &Path, pid: u32, comm: &str, utime: u64, rss_pages: u64) {
        let dir = root.join(pid.to_string());
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("stat"), stat_line(pid, comm, utime, 0)).unwrap();
        std::fs::write(dir.join("statm"), format!("1000 {rss_pages} 0 0 0 0 0\n")).unwrap();
        std::fs::write(dir.join("comm"), format!("{comm}\n")).unwrap();
    }

    #[test]
    fn test_memory_percent() {
        let dir = fake_proc();
        let source = ProcfsSource::new(dir.path());
        assert!((source.memory_percent().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_percent_static_counters() {
        let dir = fake_proc();
        let source = ProcfsSource::new(dir.path());
        assert_eq!(source.cpu_percent(Duration::from_millis(1)).unwrap(), 0.0);
    }

    #[test]
    fn test_processes_reads_each_pid() {
        let dir = fake_proc();
        let ticks = *CLK_TCK as u64;
        // 20 CPU seconds over 200 seconds of life = 10%
        add_process(dir.path(), 10, "worker", 20 * ticks, 0);
        let pages = 1024 * 1024 * 1024 / 4 / *PAGE_SIZE;
        add_process(dir.path(), 11, "cache", 0, pages);

        let source = ProcfsSource::new(dir.path());
        let procs: Vec<ProcessInfo> = source.processes().into_iter().flatten().collect();
        assert_eq!(procs.len(), 2);

        assert_eq!(procs[0].pid, 10);
        assert_eq!(procs[0].name, "worker");
        assert!((procs[0].cpu - 10.0).abs() < 0.01, "cpu {}", procs[0].cpu);

        assert_eq!(procs[1].name, "cache");
        assert!((procs[1].mem - 25.0).abs() < 0.01, "mem {}", procs[1].mem);
    }

    #[test]
    fn test_vanished_process_is_an_error_entry() {
        let dir = fake_proc();
        add_process(dir.path(), 10, "alive", 0, 1);
        // Directory present but the stat file is already gone
        std::fs::create_dir(dir.path().join("12")).unwrap();

        let source = ProcfsSource::new(dir.path());
        let results = source.processes();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(CollectError::ProcessGone { pid: 12 })
        ));
    }

    #[test]
    fn test_disk_percent_missing_path() {
        let source = ProcfsSource::default();
        assert!(source
            .disk_percent(Path::new("/nonexistent/mount/point"))
            .is_err());
    }
}
