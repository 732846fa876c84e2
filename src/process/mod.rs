//! Process-related modules for per-process CPU, memory and discovery.
//!
//! This module provides:
//! - `cpu`: CPU time parsing from /proc/<pid>/stat
//! - `memory`: resident memory from /proc/<pid>/statm
//! - `scanner`: Process discovery and names

pub mod cpu;
pub mod memory;
pub mod scanner;

// Re-export commonly used types
pub use cpu::{read_cpu_times, ProcCpuTimes, CLK_TCK};
pub use memory::{read_rss_bytes, PAGE_SIZE};
pub use scanner::{collect_proc_entries, read_process_name, ProcEntry};
