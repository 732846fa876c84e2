//! Filesystem usage collector.
//!
//! Uses libc statvfs to report how full the filesystem holding a path is.

use std::ffi::CString;
use std::mem;
use std::path::Path;

use crate::error::CollectError;

/// Block counts of one filesystem, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilesystemUsage {
    pub size_bytes: u64,
    pub used_bytes: u64,
    /// Bytes available to unprivileged users.
    pub available_bytes: u64,
}

impl FilesystemUsage {
    /// Percent used as seen by unprivileged users: `used / (used + available)`.
    ///
    /// Blocks reserved for root are left out of the denominator, so a full
    /// disk reads 100 even when root still has headroom.
    pub fn used_percent(&self) -> f64 {
        let denominator = self.used_bytes.saturating_add(self.available_bytes);
        if denominator == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / denominator as f64 * 100.0
    }
}

/// Gets filesystem usage for `path` using statvfs.
pub fn read_filesystem_usage(path: &Path) -> Result<FilesystemUsage, CollectError> {
    let statvfs_err = |source: std::io::Error| CollectError::Statvfs {
        path: path.to_path_buf(),
        source,
    };

    let c_path = CString::new(path.to_string_lossy().as_bytes())
        .map_err(|e| statvfs_err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;

    // SAFETY: statvfs is a plain C struct, zeroed memory is a valid value and
    // c_path is a valid NUL-terminated string for the duration of the call.
    let stat = unsafe {
        let mut stat: libc::statvfs = mem::zeroed();
        if libc::statvfs(c_path.as_ptr(), &mut stat) != 0 {
            return Err(statvfs_err(std::io::Error::last_os_error()));
        }
        stat
    };

    let block_size = stat.f_frsize as u64;
    let size_bytes = block_size * stat.f_blocks as u64;
    let free_bytes = block_size * stat.f_bfree as u64;
    let available_bytes = block_size * stat.f_bavail as u64;

    Ok(FilesystemUsage {
        size_bytes,
        used_bytes: size_bytes.saturating_sub(free_bytes),
        available_bytes,
    })
}
