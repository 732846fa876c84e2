//! Collect command implementation.
//!
//! Takes samples directly, without the HTTP server, and prints them.

use std::time::Instant;

use crate::cli::SampleFormat;
use crate::sampler::{Sample, Sampler};

/// Renders one sample in the requested format.
pub fn render_sample(
    sample: &Sample,
    format: SampleFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        SampleFormat::Json => serde_json::to_string_pretty(sample)?,
        SampleFormat::Yaml => serde_yaml::to_string(sample)?,
    })
}

/// Samples `iterations` times and prints each result.
pub fn command_collect(
    sampler: &Sampler,
    iterations: usize,
    format: SampleFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    for iteration in 1..=iterations {
        let start = Instant::now();
        let sample = sampler.sample()?;
        eprintln!(
            "Sample {}/{} collected in {:.0}ms",
            iteration,
            iterations,
            start.elapsed().as_secs_f64() * 1000.0
        );
        println!("{}", render_sample(&sample, format)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::NetworkCounters;
    use crate::sampler::ProcessInfo;

    fn sample() -> Sample {
        Sample {
            cpu_percent: 5.0,
            memory_percent: 40.0,
            disk_percent: 60.0,
            network_counters: NetworkCounters::default(),
            processes: vec![ProcessInfo {
                pid: 1,
                name: "init".into(),
                cpu: 0.1,
                mem: 0.2,
            }],
            timestamp: 1_700_000_000.5,
        }
    }

    #[test]
    fn test_render_sample_json() {
        let out = render_sample(&sample(), SampleFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["memory"], 40.0);
        assert_eq!(value["top_processes"][0]["name"], "init");
    }

    #[test]
    fn test_render_sample_yaml() {
        let out = render_sample(&sample(), SampleFormat::Yaml).unwrap();
        assert!(out.contains("top_processes:"));
        assert!(out.contains("bytes_recv: 0"));
    }
}
