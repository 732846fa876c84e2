//! Error types for system metrics collection.

use std::path::PathBuf;

/// Errors raised while sampling the host.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {what}: {detail}")]
    Parse { what: &'static str, detail: String },

    #[error("statvfs failed for {path}: {source}")]
    Statvfs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No usable filesystem at {primary} or {fallback}")]
    DiskUnavailable { primary: String, fallback: String },

    #[error("Process {pid} is gone")]
    ProcessGone { pid: u32 },
}

impl CollectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(what: &'static str, detail: impl Into<String>) -> Self {
        CollectError::Parse {
            what,
            detail: detail.into(),
        }
    }
}
