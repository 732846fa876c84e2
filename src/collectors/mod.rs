//! Collectors module for host-wide metrics.
//!
//! This module contains collectors for filesystem usage and network
//! interface statistics.

pub mod filesystem;
pub mod netdev;

pub use filesystem::{read_filesystem_usage, FilesystemUsage};
pub use netdev::{read_network_counters, NetworkCounters};
