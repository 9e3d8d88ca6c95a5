//! Resource extraction and reinsertion.
//!
//! A container is `prefix | resource | trailer`. Extraction copies the
//! resource out; reimport rebuilds the container around a replacement while
//! leaving the prefix untouched and relocating the trailer behind the new
//! resource.
//!
//! The pure functions here work on byte slices. The `*_file` functions read
//! their inputs fully before writing, and write through
//! [`texsplice_common::fs::write_atomic_parts`], so a failure never leaves a
//! half-written container behind.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use texsplice_common::{fs, locate, Error as CommonError, Signature};
use texsplice_fingerprint::{ContainerKind, Fingerprint};
use tracing::{debug, info, warn};

use crate::paths::{extracted_path, sibling};
use crate::{Error, Result};

/// Location of a resource inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceExtent {
    /// Offset of the first signature byte.
    pub start: usize,
    /// Resource length, or `None` for "to end of stream".
    pub length: Option<usize>,
}

impl ResourceExtent {
    /// A resource running to the end of the container.
    pub const fn to_end(start: usize) -> Self {
        Self {
            start,
            length: None,
        }
    }

    /// A resource of known length.
    pub const fn bounded(start: usize, length: usize) -> Self {
        Self {
            start,
            length: Some(length),
        }
    }

    /// One past the last resource byte in a container of `total` bytes.
    pub fn end(&self, total: usize) -> usize {
        match self.length {
            Some(length) => self.start.saturating_add(length).min(total),
            None => total,
        }
    }

    /// The resource bytes.
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        let start = self.start.min(data.len());
        &data[start..self.end(data.len()).max(start)]
    }
}

/// How reimport decides where the original resource ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailPolicy {
    /// Treat the resource as open-ended: the trailer resumes at
    /// `start + replacement length` in the original container.
    #[default]
    ReplacementLength,
    /// End the resource at the next terminator signature, or at end of
    /// stream if there is none.
    Terminator,
}

/// Offset of the embedded resource signature.
pub fn locate_resource(data: &[u8]) -> Result<usize> {
    locate::find(data, Signature::DDS_RESOURCE).ok_or(Error::SignatureNotFound {
        signature: Signature::DDS_RESOURCE,
    })
}

/// Extent from `start` to the next terminator, or to end of stream.
pub fn terminated_extent(data: &[u8], start: usize) -> ResourceExtent {
    let body_start = start + Signature::DDS_RESOURCE.len();
    match locate::find_from(data, Signature::RESOURCE_TERMINATOR, body_start) {
        Some(end) => ResourceExtent::bounded(start, end - start),
        None => ResourceExtent::to_end(start),
    }
}

/// Splice `replacement` into `container` in place of the resource at
/// `extent`.
///
/// Bytes before `extent.start` are copied unchanged. The trailer is taken
/// from the original container starting at the original resource end for a
/// bounded extent, or at `extent.start + replacement.len()` for an
/// open-ended one.
pub fn reimport_bytes(container: &[u8], extent: ResourceExtent, replacement: &[u8]) -> Vec<u8> {
    let (prefix, trailer) = split_around(container, extent, replacement.len());

    let mut out = Vec::with_capacity(prefix.len() + replacement.len() + trailer.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(replacement);
    out.extend_from_slice(trailer);
    out
}

fn split_around(
    container: &[u8],
    extent: ResourceExtent,
    replacement_len: usize,
) -> (&[u8], &[u8]) {
    let start = extent.start.min(container.len());
    let trailer_start = match extent.length {
        Some(_) => extent.end(container.len()),
        None => start.saturating_add(replacement_len).min(container.len()),
    };
    (&container[..start], &container[trailer_start..])
}

/// Summary of a file-level extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Where the resource was written.
    pub path: PathBuf,
    /// Resource offset inside the container.
    pub offset: u64,
    /// Bytes written.
    pub length: u64,
}

/// Extract the resource of `container` to `<stem>_extracted.dds`.
///
/// The signature is located by streaming, so only the resource itself is
/// held in memory.
pub fn extract_file(container: &Path) -> Result<Extracted> {
    let output = extracted_path(container)?;
    extract_file_to(container, &output)
}

/// Extract the resource of `container` to `output`.
pub fn extract_file_to(container: &Path, output: &Path) -> Result<Extracted> {
    let unopenable = |source: std::io::Error| CommonError::Unopenable {
        path: container.to_path_buf(),
        source,
    };

    let file = File::open(container).map_err(unopenable)?;
    let mut reader = BufReader::new(file);

    let offset = locate::find_in_stream(&mut reader, Signature::DDS_RESOURCE)?.ok_or(
        Error::SignatureNotFound {
            signature: Signature::DDS_RESOURCE,
        },
    )?;
    debug!(path = %container.display(), offset, "resource found");

    reader.seek(SeekFrom::Start(offset)).map_err(unopenable)?;
    let mut resource = Vec::new();
    reader.read_to_end(&mut resource).map_err(unopenable)?;

    fs::write_atomic(output, &resource)?;
    info!(path = %output.display(), bytes = resource.len(), "extracted resource");

    Ok(Extracted {
        path: output.to_path_buf(),
        offset,
        length: resource.len() as u64,
    })
}

/// Extract the resource of `container`, naming it after the container's
/// fingerprint.
///
/// The fingerprint covers the whole container, with the header dialect
/// chosen by its extension. Without a usable fingerprint the output falls
/// back to `<stem>_extracted.dds`.
pub fn extract_file_hashed(container: &Path) -> Result<Extracted> {
    let data = fs::read_file(container)?;
    let offset = locate_resource(&data)?;

    let fingerprint = Fingerprint::compute(&data, ContainerKind::from_path(container));
    let output = match fingerprint.display_name() {
        Some(name) => sibling(container, &format!("{}.dds", name)),
        None => {
            warn!(
                path = %container.display(),
                digest = format_args!("{:08x}", fingerprint.digest),
                "no dimensions for fingerprint, using default name"
            );
            extracted_path(container)?
        }
    };

    let resource = ResourceExtent::to_end(offset).slice(&data);
    fs::write_atomic(&output, resource)?;
    info!(path = %output.display(), bytes = resource.len(), "extracted resource");

    Ok(Extracted {
        path: output,
        offset: offset as u64,
        length: resource.len() as u64,
    })
}

/// Summary of a file-level reimport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reimported {
    /// Where the replacement starts.
    pub offset: usize,
    /// Container size before.
    pub old_size: usize,
    /// Container size after.
    pub new_size: usize,
}

/// Replace the resource in `container` with the contents of `replacement`.
///
/// The container is read completely before it is rewritten; the rewrite is
/// committed atomically.
pub fn reimport_file(container: &Path, replacement: &Path, policy: TailPolicy) -> Result<Reimported> {
    if !replacement.is_file() {
        return Err(Error::MissingReplacement(replacement.to_path_buf()));
    }

    let original = fs::read_file(container)?;
    let offset = locate_resource(&original)?;
    let new_resource = fs::read_file(replacement)?;

    let extent = match policy {
        TailPolicy::ReplacementLength => ResourceExtent::to_end(offset),
        TailPolicy::Terminator => terminated_extent(&original, offset),
    };
    let (prefix, trailer) = split_around(&original, extent, new_resource.len());
    fs::write_atomic_parts(container, &[prefix, &new_resource, trailer])?;

    let new_size = prefix.len() + new_resource.len() + trailer.len();
    info!(
        path = %container.display(),
        offset,
        old_size = original.len(),
        new_size,
        "reimported resource"
    );

    Ok(Reimported {
        offset,
        old_size: original.len(),
        new_size,
    })
}
