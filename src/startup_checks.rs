//! Startup requirement validation for hostmon-exporter.
//!
//! Checks that the proc files the sampler relies on are readable. Problems
//! are logged; the exporter starts regardless.

use nix::unistd::geteuid;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Files under the proc root that every sample reads.
const REQUIRED_PROC_FILES: [&str; 4] = ["stat", "meminfo", "uptime", "net/dev"];

/// Validate all runtime requirements
pub fn validate_requirements(proc_root: &Path) -> Result<(), ValidationError> {
    info!("Validating runtime requirements...");

    check_user_privileges();
    check_proc_files(proc_root)?;

    info!("All runtime requirements validated");
    Ok(())
}

/// Check if running with sufficient privileges
fn check_user_privileges() {
    if geteuid().is_root() {
        info!("Running as root (uid=0)");
    } else {
        warn!("Not running as root - details of other users' processes may be skipped");
    }
}

/// Check that the proc files read on every sample exist and are readable
fn check_proc_files(proc_root: &Path) -> Result<(), ValidationError> {
    for name in REQUIRED_PROC_FILES {
        let path = proc_root.join(name);
        if let Err(e) = fs::File::open(&path) {
            warn!("Cannot read {}: {}", path.display(), e);
            return Err(ValidationError::ProcFileUnreadable {
                path,
                reason: e.to_string(),
            });
        }
    }
    info!("{} is readable", proc_root.display());
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Cannot read {path}: {reason}")]
    ProcFileUnreadable { path: PathBuf, reason: String },
}
