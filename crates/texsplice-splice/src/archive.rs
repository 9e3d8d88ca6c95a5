//! Multi-resource archives.
//!
//! An archive is a run of resources, each a fixed-size prefix, the `DDS `
//! magic and a body, separated by the resource terminator. There is no table
//! of contents; resources are found by scanning forward for the magic and
//! then for the next terminator.

use std::path::{Path, PathBuf};

use texsplice_common::{fs, locate, Signature};
use tracing::{debug, info};

use crate::paths::archive_entry_path;
use crate::Result;

/// Bytes preceding the magic that belong to each resource.
pub const ARCHIVE_PREFIX_LEN: usize = 72;

/// One resource found in an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveResource {
    /// Zero-based position in the archive.
    pub index: usize,
    /// First byte of the resource, including its prefix.
    pub start: usize,
    /// Offset of the `DDS ` magic.
    pub magic: usize,
    /// One past the last byte.
    pub end: usize,
    /// Whether a terminator closed this resource.
    pub terminated: bool,
}

impl ArchiveResource {
    /// Resource length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the resource is empty.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// The resource bytes.
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.start..self.end]
    }
}

/// Split `data` into its resources, in order.
///
/// The prefix is clamped so it never reaches before the start of the data or
/// back into the previous resource. A resource without a terminator runs to
/// the end of the data and ends the scan.
pub fn split_archive(data: &[u8]) -> Vec<ArchiveResource> {
    let mut resources = Vec::new();
    let mut cursor = 0;

    while let Some(magic) = locate::find_from(data, Signature::DDS_MAGIC, cursor) {
        let start = magic.saturating_sub(ARCHIVE_PREFIX_LEN).max(cursor);
        let body = magic + Signature::DDS_MAGIC.len();
        let terminator = locate::find_from(data, Signature::RESOURCE_TERMINATOR, body);

        let resource = ArchiveResource {
            index: resources.len(),
            start,
            magic,
            end: terminator.unwrap_or(data.len()),
            terminated: terminator.is_some(),
        };
        debug!(
            index = resource.index,
            start = resource.start,
            magic = resource.magic,
            end = resource.end,
            "archive resource"
        );
        resources.push(resource);

        match terminator {
            Some(end) => cursor = end,
            None => break,
        }
    }

    resources
}

/// Write every resource of `archive` to `<stem>_extracted_NNN.dds`.
///
/// Returns the written paths in archive order; an archive without any
/// resources writes nothing.
pub fn extract_archive_file(archive: &Path) -> Result<Vec<PathBuf>> {
    let data = fs::read_file(archive)?;
    let resources = split_archive(&data);

    let mut written = Vec::with_capacity(resources.len());
    for resource in &resources {
        let output = archive_entry_path(archive, resource.index)?;
        fs::write_atomic(&output, resource.slice(&data))?;
        written.push(output);
    }

    info!(
        path = %archive.display(),
        resources = written.len(),
        "extracted archive"
    );
    Ok(written)
}
