//! Network interface statistics collector.
//!
//! Reads `<proc_root>/net/dev` and sums the counters of every interface
//! (loopback included) into one host-wide set.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CollectError;

/// Host-wide network counters, summed over all interfaces.
///
/// Field order is the JSON key order of the `net` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errin: u64,
    pub errout: u64,
    pub dropin: u64,
    pub dropout: u64,
}

impl NetworkCounters {
    fn add(&mut self, other: &NetworkCounters) {
        self.bytes_sent = self.bytes_sent.saturating_add(other.bytes_sent);
        self.bytes_recv = self.bytes_recv.saturating_add(other.bytes_recv);
        self.packets_sent = self.packets_sent.saturating_add(other.packets_sent);
        self.packets_recv = self.packets_recv.saturating_add(other.packets_recv);
        self.errin = self.errin.saturating_add(other.errin);
        self.errout = self.errout.saturating_add(other.errout);
        self.dropin = self.dropin.saturating_add(other.dropin);
        self.dropout = self.dropout.saturating_add(other.dropout);
    }
}

/// Reads `<proc_root>/net/dev` and returns the aggregate counters.
pub fn read_network_counters(proc_root: &Path) -> Result<NetworkCounters, CollectError> {
    let path = proc_root.join("net").join("dev");
    let content = fs::read_to_string(&path).map_err(|e| CollectError::io(&path, e))?;
    Ok(parse_netdev(&content))
}

fn parse_netdev(content: &str) -> NetworkCounters {
    let mut total = NetworkCounters::default();

    // Skip the two header lines
    for line in content.lines().skip(2) {
        let Some((_iface, stats_str)) = line.split_once(':') else {
            continue;
        };

        let values: Vec<&str> = stats_str.split_whitespace().collect();
        if values.len() < 16 {
            continue; // Skip malformed lines
        }

        let value = |idx: usize| values[idx].parse::<u64>().unwrap_or(0);

        total.add(&NetworkCounters {
            bytes_recv: value(0),
            packets_recv: value(1),
            errin: value(2),
            dropin: value(3),
            bytes_sent: value(8),
            packets_sent: value(9),
            errout: value(10),
            dropout: value(11),
        });
    }

    total
}
