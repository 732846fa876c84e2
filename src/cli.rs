//! CLI arguments and subcommands for hostmon-exporter.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Output format for the `collect` subcommand
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SampleFormat {
    Json,
    Yaml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "hostmon-exporter",
    about = "Host resource dashboard with JSON stats and Prometheus gauges",
    long_about = "Host resource dashboard with JSON stats and Prometheus gauges.\n\n\
                  Serves a live dashboard at /, a fresh CPU/memory/disk/network/top-process \
                  sample at /api/stats, and the last sampled percentages at /metrics.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Bind to specific interface/IP
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Root of the proc filesystem to sample
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Filesystem path whose usage is reported as disk percent
    #[arg(long)]
    pub disk_path: Option<String>,

    /// Path tried when --disk-path cannot be read
    #[arg(long)]
    pub fallback_disk_path: Option<String>,

    /// Number of processes listed in top_processes
    #[arg(long)]
    pub top_processes: Option<usize>,

    /// Enable TLS/SSL for HTTPS
    #[arg(long)]
    pub enable_tls: bool,

    /// Path to TLS certificate file (PEM format)
    #[arg(long)]
    pub tls_cert: Option<PathBuf>,

    /// Path to TLS private key file (PEM format)
    #[arg(long)]
    pub tls_key: Option<PathBuf>,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect samples directly and print them
    Collect {
        /// Number of samples to take
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: SampleFormat,
    },

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,
    },
}
