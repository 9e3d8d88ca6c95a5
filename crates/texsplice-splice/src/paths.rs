//! Output file naming.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// File stem of `path` as text.
pub fn stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))
}

/// A file called `name` in the same directory as `path`.
pub fn sibling(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// `<stem>_extracted.dds` next to the container.
///
/// Extraction writes here and reimport reads from here.
pub fn extracted_path(container: &Path) -> Result<PathBuf> {
    Ok(sibling(container, &format!("{}_extracted.dds", stem(container)?)))
}

/// `<stem>_extracted_NNN.dds` next to an archive.
pub fn archive_entry_path(archive: &Path, index: usize) -> Result<PathBuf> {
    Ok(sibling(
        archive,
        &format!("{}_extracted_{:03}.dds", stem(archive)?, index),
    ))
}
