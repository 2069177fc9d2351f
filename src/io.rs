use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Threshold in bytes above which we attempt to use mmap for reading.
/// Callers can override via API; this is a reasonable default.
pub const DEFAULT_MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024; // 16 MiB

/// Whole-file contents, either owned or memory-mapped.
#[derive(Debug)]
pub enum FileBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileBytes::Owned(v) => v,
            FileBytes::Mapped(m) => m,
        }
    }
}

/// Decide whether to use mmap based on file size and threshold.
pub fn should_use_mmap(file_size_bytes: u64, threshold_bytes: u64) -> bool {
    file_size_bytes >= threshold_bytes
}

/// Read the entire file into an owned buffer (non-mmap).
pub fn read_bytes_owned<P: AsRef<Path>>(path: P) -> Result<FileBytes> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("read {}", path.as_ref().display()))?;
    Ok(FileBytes::Owned(bytes))
}

/// Map the entire file. The handle is dropped once the mapping exists; the
/// mapping itself is released when the returned value goes out of scope.
pub fn read_bytes_mmap<P: AsRef<Path>>(path: P) -> Result<FileBytes> {
    let file = File::open(&path).with_context(|| format!("open {}", path.as_ref().display()))?;
    let mmap =
        unsafe { Mmap::map(&file) }.with_context(|| format!("mmap {}", path.as_ref().display()))?;
    Ok(FileBytes::Mapped(mmap))
}

/// Choose mmap or an owned read based on file size.
pub fn read_bytes_auto<P: AsRef<Path>>(path: P, threshold_bytes: u64) -> Result<FileBytes> {
    let meta =
        std::fs::metadata(&path).with_context(|| format!("stat {}", path.as_ref().display()))?;
    if meta.is_file() && should_use_mmap(meta.len(), threshold_bytes) {
        read_bytes_mmap(path)
    } else {
        read_bytes_owned(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn threshold_decision() {
        assert!(should_use_mmap(16, 16));
        assert!(!should_use_mmap(15, 16));
    }

    #[test]
    fn owned_and_mapped_yield_same_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.wer");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"EventType=APPCRASH\r\n").unwrap();
        drop(f);

        let owned = read_bytes_auto(&path, u64::MAX).unwrap();
        let mapped = read_bytes_auto(&path, 1).unwrap();
        assert_eq!(&*owned, b"EventType=APPCRASH\r\n");
        assert_eq!(&*owned, &*mapped);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = read_bytes_auto(dir.path().join("nope.wer"), u64::MAX).unwrap_err();
        assert!(err.to_string().contains("stat"));
    }
}
