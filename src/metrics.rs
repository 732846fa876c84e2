//! Prometheus gauges for the scrape endpoint.
//!
//! [`GaugeState`] keeps the CPU, memory and disk percentages of the most
//! recent `/api/stats` collection in a private registry. Values persist
//! between collections and read zero before the first one.

use prometheus::{Encoder, Gauge, Registry, TextEncoder};

use crate::sampler::Sample;

/// Buffer capacity for metrics encoding.
const BUFFER_CAP: usize = 1024;

/// Last observed host percentages, exposed as Prometheus gauges.
#[derive(Clone)]
pub struct GaugeState {
    registry: Registry,
    cpu: Gauge,
    memory: Gauge,
    disk: Gauge,
}

impl GaugeState {
    /// Creates and registers the three gauges with a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cpu = Gauge::new("container_cpu_percent", "CPU percent")?;
        let memory = Gauge::new("container_memory_percent", "Memory percent")?;
        let disk = Gauge::new("container_disk_percent", "Disk percent")?;

        registry.register(Box::new(cpu.clone()))?;
        registry.register(Box::new(memory.clone()))?;
        registry.register(Box::new(disk.clone()))?;

        Ok(Self {
            registry,
            cpu,
            memory,
            disk,
        })
    }

    /// Overwrites all three gauges. Gauge writes are atomic and cannot fail.
    pub fn record(&self, cpu: f64, memory: f64, disk: f64) {
        self.cpu.set(cpu);
        self.memory.set(memory);
        self.disk.set(disk);
    }

    /// Records the scalar values of a sample.
    pub fn record_sample(&self, sample: &Sample) {
        self.record(
            sample.cpu_percent,
            sample.memory_percent,
            sample.disk_percent,
        );
    }

    /// Current values as (cpu, memory, disk).
    pub fn values(&self) -> (f64, f64, f64) {
        (self.cpu.get(), self.memory.get(), self.disk.get())
    }

    /// Renders the registry in the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::with_capacity(BUFFER_CAP);
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(text: &str, name: &str) -> Option<f64> {
        text.lines()
            .find_map(|l| l.strip_prefix(name)?.strip_prefix(' '))
            .and_then(|v| v.trim().parse().ok())
    }

    #[test]
    fn test_gauges_start_at_zero() {
        let gauges = GaugeState::new().unwrap();
        assert_eq!(gauges.values(), (0.0, 0.0, 0.0));

        let text = gauges.encode().unwrap();
        assert_eq!(value_of(&text, "container_cpu_percent"), Some(0.0));
        assert_eq!(value_of(&text, "container_memory_percent"), Some(0.0));
        assert_eq!(value_of(&text, "container_disk_percent"), Some(0.0));
    }

    #[test]
    fn test_record_overwrites() {
        let gauges = GaugeState::new().unwrap();
        gauges.record(10.0, 20.0, 30.0);
        gauges.record(42.5, 63.1, 71.9);
        assert_eq!(gauges.values(), (42.5, 63.1, 71.9));

        let text = gauges.encode().unwrap();
        assert_eq!(value_of(&text, "container_cpu_percent"), Some(42.5));
        assert_eq!(value_of(&text, "container_memory_percent"), Some(63.1));
        assert_eq!(value_of(&text, "container_disk_percent"), Some(71.9));
    }

    #[test]
    fn test_exposition_has_help_and_type() {
        let text = GaugeState::new().unwrap().encode().unwrap();
        assert!(text.contains("# HELP container_cpu_percent CPU percent"));
        assert!(text.contains("# TYPE container_cpu_percent gauge"));
        assert!(text.contains("# HELP container_memory_percent Memory percent"));
        assert!(text.contains("# TYPE container_disk_percent gauge"));
    }

    #[test]
    fn test_clones_share_values() {
        let gauges = GaugeState::new().unwrap();
        let reader = gauges.clone();
        gauges.record(1.0, 2.0, 3.0);
        assert_eq!(reader.values(), (1.0, 2.0, 3.0));
    }
}
