//! CPU statistics parsing for process metrics.
//!
//! This module reads CPU time and start time from `/proc/<pid>/stat` and turns
//! them into a single-read CPU percentage: CPU seconds consumed divided by the
//! seconds the process has been alive. No samples are kept between calls.

use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;

/// Get system clock ticks per second (usually 100, but can vary).
fn get_clk_tck() -> f64 {
    // SAFETY: sysconf is safe to call with _SC_CLK_TCK
    // Returns -1 on error, 0 if undefined - both are handled by the > 0 check
    unsafe {
        let tck = libc::sysconf(libc::_SC_CLK_TCK);
        if tck > 0 {
            return tck as f64;
        }
    }
    100.0
}

/// System clock ticks per second (for CPU time calculation).
pub static CLK_TCK: Lazy<f64> = Lazy::new(get_clk_tck);

/// CPU times of one process, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcCpuTimes {
    /// utime + stime.
    pub cpu_time_seconds: f64,
    /// Start time in seconds since boot.
    pub start_time_seconds: f64,
}

impl ProcCpuTimes {
    /// Average CPU percent over the process lifetime, given the system uptime.
    pub fn lifetime_percent(&self, uptime_seconds: f64) -> f64 {
        let alive = uptime_seconds - self.start_time_seconds;
        if alive <= 0.0 {
            return 0.0;
        }
        (self.cpu_time_seconds / alive * 100.0).max(0.0)
    }
}

/// Parse CPU and start times from `/proc/<pid>/stat`.
pub fn read_cpu_times(proc_path: &Path) -> Result<ProcCpuTimes, std::io::Error> {
    let content = fs::read_to_string(proc_path.join("stat"))?;
    parse_stat(&content)
}

fn parse_stat(content: &str) -> Result<ProcCpuTimes, std::io::Error> {
    // comm may contain spaces and parentheses; fields resume after the last ')'
    let rest = content
        .rfind(')')
        .map(|idx| &content[idx + 1..])
        .ok_or_else(|| std::io::Error::other("Invalid stat format"))?;

    // rest[0] is field 3 (state), so field N lives at index N - 3
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() <= 19 {
        return Err(std::io::Error::other("Invalid stat format"));
    }

    let utime: f64 = parts[11].parse().unwrap_or(0.0);
    let stime: f64 = parts[12].parse().unwrap_or(0.0);
    let starttime: f64 = parts[19]
        .parse()
        .map_err(|_| std::io::Error::other("Failed to parse starttime field"))?;

    Ok(ProcCpuTimes {
        cpu_time_seconds: (utime + stime) / *CLK_TCK,
        start_time_seconds: starttime / *CLK_TCK,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // utime=1000 stime=500 starttime=12345
    const STAT: &str = "1234 (test_process) S 1 1234 1234 0 -1 4194304 100 0 0 0 1000 500 0 0 20 0 1 0 12345 12345678 1234 18446744073709551615 4194304 4238788 140736466511168 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0";

    #[test]
    fn test_read_cpu_times() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("stat"), STAT).expect("Failed to write stat file");

        let times = read_cpu_times(dir.path()).unwrap();
        assert!((times.cpu_time_seconds - 1500.0 / *CLK_TCK).abs() < 0.001);
        assert!((times.start_time_seconds - 12345.0 / *CLK_TCK).abs() < 0.001);
    }

    #[test]
    fn test_parse_stat_comm_with_spaces() {
        let stat = STAT.replace("(test_process)", "(Web Content (x))");
        let times = parse_stat(&stat).unwrap();
        assert!((times.cpu_time_seconds - 1500.0 / *CLK_TCK).abs() < 0.001);
    }

    #[test]
    fn test_parse_stat_invalid() {
        assert!(parse_stat("1234 (test) S 1 2 3").is_err());
        assert!(parse_stat("garbage").is_err());
    }

    #[test]
    fn test_read_cpu_times_missing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = read_cpu_times(dir.path()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_lifetime_percent() {
        let times = ProcCpuTimes {
            cpu_time_seconds: 5.0,
            start_time_seconds: 90.0,
        };
        assert!((times.lifetime_percent(100.0) - 50.0).abs() < 1e-9);
        // Started "after" the uptime reading
        assert_eq!(times.lifetime_percent(80.0), 0.0);
    }
}
