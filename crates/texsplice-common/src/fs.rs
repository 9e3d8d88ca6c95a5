//! File helpers with path-tagged errors.
//!
//! Writes go to a temporary file in the destination's directory and are
//! renamed over the target only once every byte is on disk, so a failed
//! write leaves the previous file contents in place.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use crate::{Error, Result};

/// Read a whole file, reporting the path on failure.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| Error::Unopenable {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `data` atomically.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    write_atomic_parts(path, &[data])
}

/// Replace `path` with the concatenation of `parts` atomically.
pub fn write_atomic_parts<P: AsRef<Path>>(path: P, parts: &[&[u8]]) -> Result<()> {
    let path = path.as_ref();
    let unopenable = |source: std::io::Error| Error::Unopenable {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    let mut temp = NamedTempFile::new_in(&dir).map_err(unopenable)?;
    for part in parts {
        temp.write_all(part).map_err(unopenable)?;
    }
    temp.as_file().sync_all().map_err(unopenable)?;

    temp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    trace!(path = %path.display(), "committed");
    Ok(())
}

/// Directory a path lives in, `.` for bare file names.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write_atomic(&path, b"first").unwrap();
        write_atomic_parts(&path, &[&b"sec"[..], &b"ond"[..]]).unwrap();

        assert_eq!(read_file(&path).unwrap(), b"second");
    }

    #[test]
    fn test_missing_file_is_unopenable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        match read_file(&path) {
            Err(Error::Unopenable { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Unopenable, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.bin");

        assert!(write_atomic(&path, b"data").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("file.bin")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/file.bin")), PathBuf::from("a"));
    }
}
