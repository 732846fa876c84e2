//! System-wide metrics collection from the proc filesystem.
//!
//! This module provides functions to read aggregate CPU times, physical memory
//! and uptime from a proc root (normally `/proc`), plus the host name from
//! the uname syscall.

use std::fs;
use std::path::Path;

use crate::error::CollectError;

/// Physical memory totals in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl MemoryInfo {
    /// Percent of physical memory in use, `(total - available) / total`.
    pub fn used_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        let used = self.total_bytes.saturating_sub(self.available_bytes);
        used as f64 / self.total_bytes as f64 * 100.0
    }
}

/// Aggregate CPU times from the `cpu` line of /proc/stat, in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuStat {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuStat {
    /// Calculate total CPU time (all fields).
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }

    /// Calculate non-active time (idle + iowait).
    pub fn idle_total(&self) -> u64 {
        self.idle + self.iowait
    }

    /// Busy percent between an earlier reading and this one.
    ///
    /// Returns 0.0 when the counters did not advance.
    pub fn busy_percent_since(&self, earlier: &CpuStat) -> f64 {
        let delta_total = self.total().saturating_sub(earlier.total());
        if delta_total == 0 {
            return 0.0;
        }
        let delta_idle = self.idle_total().saturating_sub(earlier.idle_total());
        let busy = delta_total.saturating_sub(delta_idle);
        (busy as f64 / delta_total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Reads the aggregate CPU line from `<proc_root>/stat`.
pub fn read_cpu_stat(proc_root: &Path) -> Result<CpuStat, CollectError> {
    let path = proc_root.join("stat");
    let content = fs::read_to_string(&path).map_err(|e| CollectError::io(&path, e))?;

    content
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| CollectError::parse("/proc/stat", "no aggregate cpu line"))
        .and_then(parse_cpu_line)
}

fn parse_cpu_line(line: &str) -> Result<CpuStat, CollectError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 8 {
        return Err(CollectError::parse(
            "/proc/stat",
            format!("expected at least 8 fields, got {}", parts.len()),
        ));
    }

    let field = |idx: usize| parts.get(idx).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);

    Ok(CpuStat {
        user: field(1),
        nice: field(2),
        system: field(3),
        idle: field(4),
        iowait: field(5),
        irq: field(6),
        softirq: field(7),
        steal: field(8),
    })
}

/// Reads MemTotal and MemAvailable from `<proc_root>/meminfo`.
pub fn read_memory_info(proc_root: &Path) -> Result<MemoryInfo, CollectError> {
    let path = proc_root.join("meminfo");
    let content = fs::read_to_string(&path).map_err(|e| CollectError::io(&path, e))?;

    let mut total_bytes: Option<u64> = None;
    let mut available_bytes: Option<u64> = None;

    for line in content.lines() {
        if let Some(v) = line.strip_prefix("MemTotal:") {
            total_bytes = parse_kb_value(v).map(|kb| kb * 1024);
        } else if let Some(v) = line.strip_prefix("MemAvailable:") {
            available_bytes = parse_kb_value(v).map(|kb| kb * 1024);
        }

        if total_bytes.is_some() && available_bytes.is_some() {
            break;
        }
    }

    match (total_bytes, available_bytes) {
        (Some(total_bytes), Some(available_bytes)) => Ok(MemoryInfo {
            total_bytes,
            available_bytes,
        }),
        _ => Err(CollectError::parse(
            "/proc/meminfo",
            "MemTotal or MemAvailable missing",
        )),
    }
}

fn parse_kb_value(v: &str) -> Option<u64> {
    v.split_whitespace().next().and_then(|n| n.parse().ok())
}

/// Reads system uptime in seconds from `<proc_root>/uptime`.
pub fn read_uptime(proc_root: &Path) -> Result<f64, CollectError> {
    let path = proc_root.join("uptime");
    let content = fs::read_to_string(&path).map_err(|e| CollectError::io(&path, e))?;

    content
        .split_whitespace()
        .next()
        .ok_or_else(|| CollectError::parse("/proc/uptime", "no fields found"))?
        .parse::<f64>()
        .map_err(|e| CollectError::parse("/proc/uptime", e.to_string()))
}

/// Returns the host's network name (uname nodename), or "unknown".
pub fn hostname() -> String {
    use std::ffi::CStr;
    use std::mem;

    // SAFETY: utsname only holds c_char arrays, so zeroed memory is valid and
    // uname NUL-terminates every field it fills.
    unsafe {
        let mut utsname: libc::utsname = mem::zeroed();
        if libc::uname(&mut utsname) == 0 {
            let node = CStr::from_ptr(utsname.nodename.as_ptr())
                .to_string_lossy()
                .into_owned();
            if !node.is_empty() {
                return node;
            }
        }
    }
    "unknown".to_string()
}
