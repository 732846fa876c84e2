//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

const YAML_HEADER: &str = r#"# hostmon-exporter configuration
#
# bind: "0.0.0.0"            # Bind IP (0.0.0.0 = all interfaces)
# port: 5000                 # HTTP port
# proc_root: /proc           # proc filesystem to sample
# primary_disk_path: "C:\\"  # disk percent path, tried first
# fallback_disk_path: /      # used when primary_disk_path cannot be read
# top_processes: 8           # processes listed in /api/stats (1-64)
# enable_tls: false          # serve HTTPS (needs tls_cert_path and tls_key_path)

"#;

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| PathBuf::from("hostmon-exporter.yaml"));

    let mut content = render_config(&Config::default(), format)?;
    if matches!(format, ConfigFormat::Yaml) {
        content.insert_str(0, YAML_HEADER);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("Configuration written to: {}", output.display());
    }

    Ok(())
}
