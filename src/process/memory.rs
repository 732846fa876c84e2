//! Resident memory of a process from `/proc/<pid>/statm`.

use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;

fn get_page_size() -> u64 {
    // SAFETY: sysconf is safe to call with _SC_PAGESIZE
    unsafe {
        let size = libc::sysconf(libc::_SC_PAGESIZE);
        if size > 0 {
            return size as u64;
        }
    }
    4096
}

/// Memory page size in bytes.
pub static PAGE_SIZE: Lazy<u64> = Lazy::new(get_page_size);

/// Reads the resident set size in bytes (statm field 2 times the page size).
pub fn read_rss_bytes(proc_path: &Path) -> Result<u64, std::io::Error> {
    let content = fs::read_to_string(proc_path.join("statm"))?;
    let resident_pages: u64 = content
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| std::io::Error::other("Invalid statm format"))?
        .parse()
        .map_err(|_| std::io::Error::other("Failed to parse resident pages"))?;
    Ok(resident_pages * *PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_rss_bytes() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("statm"), "5000 1200 300 10 0 900 0\n").unwrap();
        assert_eq!(read_rss_bytes(dir.path()).unwrap(), 1200 * *PAGE_SIZE);
    }

    #[test]
    fn test_read_rss_bytes_invalid() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("statm"), "5000\n").unwrap();
        assert!(read_rss_bytes(dir.path()).is_err());
    }
}
