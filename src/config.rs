//! Configuration management for hostmon-exporter.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_PRIMARY_DISK_PATH: &str = "C:\\";
pub const DEFAULT_FALLBACK_DISK_PATH: &str = "/";
pub const DEFAULT_TOP_PROCESSES: usize = 8;

/// Upper bound for `top_processes`.
pub const MAX_TOP_PROCESSES: usize = 64;

/// Exporter configuration. `None` means "use the default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub port: Option<u16>,
    pub bind: Option<String>,

    // Sampling
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,
    #[serde(alias = "primary-disk-path", alias = "disk_path")]
    pub primary_disk_path: Option<String>,
    #[serde(alias = "fallback-disk-path")]
    pub fallback_disk_path: Option<String>,
    #[serde(alias = "top-processes")]
    pub top_processes: Option<usize>,

    // TLS/SSL Configuration
    #[serde(alias = "enable-tls")]
    pub enable_tls: Option<bool>,
    #[serde(alias = "tls-cert-path")]
    pub tls_cert_path: Option<String>,
    #[serde(alias = "tls-key-path")]
    pub tls_key_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: Some(DEFAULT_BIND_ADDR.to_string()),
            port: Some(DEFAULT_PORT),
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            primary_disk_path: Some(DEFAULT_PRIMARY_DISK_PATH.to_string()),
            fallback_disk_path: Some(DEFAULT_FALLBACK_DISK_PATH.to_string()),
            top_processes: Some(DEFAULT_TOP_PROCESSES),
            enable_tls: Some(false),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Config {
    /// Effective proc root.
    pub fn proc_root(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT))
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(bind) = cfg.bind.as_deref() {
        if bind.parse::<std::net::IpAddr>().is_err() {
            return Err(format!("Invalid bind address '{}'", bind).into());
        }
    }

    if cfg.port == Some(0) {
        return Err("port must be between 1 and 65535".into());
    }

    if let Some(n) = cfg.top_processes {
        if n == 0 || n > MAX_TOP_PROCESSES {
            return Err(format!(
                "top_processes must be between 1 and {}, got {}",
                MAX_TOP_PROCESSES, n
            )
            .into());
        }
    }

    for (key, value) in [
        ("primary_disk_path", &cfg.primary_disk_path),
        ("fallback_disk_path", &cfg.fallback_disk_path),
    ] {
        if value.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(format!("{} must not be empty", key).into());
        }
    }

    // TLS validation
    if cfg.enable_tls.unwrap_or(false) {
        let cert_path = cfg.tls_cert_path.as_deref();
        let key_path = cfg.tls_key_path.as_deref();

        match (cert_path, key_path) {
            (None, None) => {
                return Err(
                    "TLS is enabled but neither tls_cert_path nor tls_key_path are set".into(),
                );
            }
            (Some(_), None) => {
                return Err("TLS is enabled but tls_key_path is not set".into());
            }
            (None, Some(_)) => {
                return Err("TLS is enabled but tls_cert_path is not set".into());
            }
            (Some(cert), Some(key)) => {
                check_pem_file("certificate", cert)?;
                check_pem_file("private key", key)?;
            }
        }
    }

    Ok(())
}

fn check_pem_file(kind: &str, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => Err(format!("TLS {} file is empty: {}", kind, path).into()),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("TLS {} file not found: {}", kind, path).into())
        }
        Err(e) => Err(format!("TLS {} file is not readable: {} ({})", kind, path, e).into()),
    }
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(bind_ip) = args.bind {
        config.bind = Some(bind_ip.to_string());
    }
    if let Some(cli_port) = args.port {
        config.port = Some(cli_port);
    }

    // Sampling overrides
    if let Some(proc_root) = &args.proc_root {
        config.proc_root = Some(proc_root.clone());
    }
    if let Some(path) = &args.disk_path {
        config.primary_disk_path = Some(path.clone());
    }
    if let Some(path) = &args.fallback_disk_path {
        config.fallback_disk_path = Some(path.clone());
    }
    if let Some(n) = args.top_processes {
        config.top_processes = Some(n);
    }

    // TLS configuration: CLI wins if provided
    if args.enable_tls {
        config.enable_tls = Some(true);
    }
    if let Some(cert_path) = &args.tls_cert {
        config.tls_cert_path = Some(cert_path.to_string_lossy().to_string());
    }
    if let Some(key_path) = &args.tls_key {
        config.tls_key_path = Some(key_path.to_string_lossy().to_string());
    }

    Ok(config)
}

/// Loads a config file, probing the default locations when `path` is None.
/// Missing files yield the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let defaults = [
                "/etc/hostmon/exporter.yaml",
                "/etc/hostmon/exporter.yml",
                "/etc/hostmon/exporter.json",
                "./hostmon-exporter.yaml",
                "./hostmon-exporter.yml",
                "./hostmon-exporter.json",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(p) => PathBuf::from(p),
                None => return Ok(Config::default()),
            }
        }
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        // Default to YAML
        _ => serde_yaml::from_str(&content)?,
    };
    info!("Loaded configuration from: {}", path.display());

    Ok(merge_defaults(config))
}

/// Fills unset keys of a file-loaded config with the defaults.
fn merge_defaults(cfg: Config) -> Config {
    let d = Config::default();
    Config {
        port: cfg.port.or(d.port),
        bind: cfg.bind.or(d.bind),
        proc_root: cfg.proc_root.or(d.proc_root),
        primary_disk_path: cfg.primary_disk_path.or(d.primary_disk_path),
        fallback_disk_path: cfg.fallback_disk_path.or(d.fallback_disk_path),
        top_processes: cfg.top_processes.or(d.top_processes),
        enable_tls: cfg.enable_tls.or(d.enable_tls),
        tls_cert_path: cfg.tls_cert_path,
        tls_key_path: cfg.tls_key_path,
    }
}

/// Renders a configuration in the requested format.
pub fn render_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_config(config, format)?);
    Ok(())
}
