//! CLI command implementations for hostmon-exporter.
//!
//! - `collect`: one-shot sampling without the HTTP server
//! - `config`: Configuration file generation

pub mod collect;
pub mod config;

// Re-export command functions
pub use collect::command_collect;
pub use config::command_config;
