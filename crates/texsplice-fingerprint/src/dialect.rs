//! Header dialect detection.
//!
//! Containers carry no trustworthy schema, so the header (if any) in front of
//! the texture payload is guessed from the file extension plus a signature
//! scan, then confirmed by checking its resource-start field.
//!
//! All recognised primary headers share one 0x40-byte layout:
//!
//! | Offset | Size | Field                          |
//! |--------|------|--------------------------------|
//! | 0x08   | 2    | width                          |
//! | 0x0A   | 2    | height                         |
//! | 0x10   | 4    | resource start (must be 0x40)  |
//!
//! A `K7TX` tag at the resource start adds an 8-byte sub-header: the tag and
//! a 4-byte payload length.

use std::path::Path;

use texsplice_common::{locate, BinaryReader, Endian, Signature};
use tracing::debug;

/// Size of the primary header.
pub const HEADER_SIZE: usize = 0x40;

const WIDTH_OFFSET: usize = 0x08;
const HEIGHT_OFFSET: usize = 0x0A;
const RESOURCE_START_OFFSET: usize = 0x10;

/// The only resource-start value a genuine header carries.
pub const EXPECTED_RESOURCE_START: u32 = 0x40;

/// Size of the `K7TX` sub-header.
pub const SECONDARY_HEADER_SIZE: usize = 8;

/// Container family, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// `.bin`: little-endian header at offset 0.
    Bin,
    /// `.jmb`: little-endian header at the first JMB texture tag.
    Jmb,
    /// `.sti`: big-endian header at the first `GCT0` tag.
    Sti,
    /// Anything else: hashed whole.
    Other,
}

impl ContainerKind {
    /// Classify an extension, ignoring case.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "bin" => Self::Bin,
            "jmb" => Self::Jmb,
            "sti" => Self::Sti,
            _ => Self::Other,
        }
    }

    /// Classify a path by its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map_or(Self::Other, Self::from_extension)
    }
}

/// Which header precedes the hashed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDialect {
    /// No header; the whole file is hashed.
    None,
    /// Little-endian header at a fixed or scanned offset.
    FixedOffset,
    /// Big-endian header opened by a 4-byte ASCII tag.
    Tagged,
    /// Either primary header followed by a `K7TX` sub-header.
    SecondaryWrapped,
}

/// Candidate header position before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    /// `FixedOffset` or `Tagged`.
    pub dialect: HeaderDialect,
    /// Offset of the header's first byte.
    pub offset: usize,
    /// Byte order of the header fields and payload words.
    pub endian: Endian,
}

/// Find where a header would start for this container kind.
pub fn locate_header(data: &[u8], kind: ContainerKind) -> Option<HeaderLocation> {
    let (dialect, offset, endian) = match kind {
        ContainerKind::Bin => (HeaderDialect::FixedOffset, 0, Endian::Little),
        ContainerKind::Jmb => (
            HeaderDialect::FixedOffset,
            locate::find(data, Signature::RESOURCE_TERMINATOR)?,
            Endian::Little,
        ),
        ContainerKind::Sti => (
            HeaderDialect::Tagged,
            locate::find(data, Signature::GCT0)?,
            Endian::Big,
        ),
        ContainerKind::Other => return None,
    };

    Some(HeaderLocation {
        dialect,
        offset,
        endian,
    })
}

/// The region of a file that gets digested, plus what the header said.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashWindow {
    /// Dialect that produced this window.
    pub dialect: HeaderDialect,
    /// Byte order for payload words.
    pub endian: Endian,
    /// First hashed byte.
    pub start: usize,
    /// Number of hashed bytes.
    pub len: usize,
    /// Width from the header, 0 when unknown.
    pub width: u16,
    /// Height from the header, 0 when unknown.
    pub height: u16,
}

impl HashWindow {
    /// The whole file, no header.
    pub fn whole(data: &[u8]) -> Self {
        Self {
            dialect: HeaderDialect::None,
            endian: Endian::Little,
            start: 0,
            len: data.len(),
            width: 0,
            height: 0,
        }
    }

    /// Detect and validate a header, falling back to [`whole`](Self::whole).
    pub fn resolve(data: &[u8], kind: ContainerKind) -> Self {
        let Some(location) = locate_header(data, kind) else {
            debug!(?kind, "no recognised header, hashing whole file");
            return Self::whole(data);
        };

        Self::from_header(data, location).unwrap_or_else(|| Self::whole(data))
    }

    /// Validate the header at `location` and narrow to its payload.
    ///
    /// Returns `None` when the header is truncated or its resource-start
    /// field is not [`EXPECTED_RESOURCE_START`].
    pub fn from_header(data: &[u8], location: HeaderLocation) -> Option<Self> {
        let header_start = location.offset;
        if data.len() <= header_start + HEADER_SIZE {
            debug!(header_start, len = data.len(), "header truncated, hashing whole file");
            return None;
        }

        let reader = BinaryReader::new(data).with_endian(location.endian);
        let width = reader.u16_at(header_start + WIDTH_OFFSET).ok()?;
        let height = reader.u16_at(header_start + HEIGHT_OFFSET).ok()?;
        let resource_start = reader.u32_at(header_start + RESOURCE_START_OFFSET).ok()?;

        if resource_start != EXPECTED_RESOURCE_START {
            debug!(
                header_start,
                resource_start, "header resource start invalid, hashing whole file"
            );
            return None;
        }

        let payload_start = header_start + resource_start as usize;
        let mut window = Self {
            dialect: location.dialect,
            endian: location.endian,
            start: payload_start,
            len: data.len() - payload_start,
            width,
            height,
        };

        let mut payload = BinaryReader::new_at(data, payload_start).with_endian(location.endian);
        if payload.peek_matches(Signature::K7TX.as_bytes()) {
            payload.advance(Signature::K7TX.len());
            if let Ok(declared) = payload.read_u32() {
                window.dialect = HeaderDialect::SecondaryWrapped;
                window.start = payload.position();
                window.len = (declared as usize).min(payload.remaining());
                debug!(declared, "found K7TX sub-header");
            }
        }

        Some(window)
    }

    /// The hashed bytes.
    #[inline]
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.start..self.start + self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(endian: Endian, width: u16, height: u16, resource_start: u32) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        let (w, h, r) = match endian {
            Endian::Little => (
                width.to_le_bytes(),
                height.to_le_bytes(),
                resource_start.to_le_bytes(),
            ),
            Endian::Big => (
                width.to_be_bytes(),
                height.to_be_bytes(),
                resource_start.to_be_bytes(),
            ),
        };
        data[WIDTH_OFFSET..WIDTH_OFFSET + 2].copy_from_slice(&w);
        data[HEIGHT_OFFSET..HEIGHT_OFFSET + 2].copy_from_slice(&h);
        data[RESOURCE_START_OFFSET..RESOURCE_START_OFFSET + 4].copy_from_slice(&r);
        data
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ContainerKind::from_extension("BIN"), ContainerKind::Bin);
        assert_eq!(ContainerKind::from_path("a/b/tex.jmb"), ContainerKind::Jmb);
        assert_eq!(ContainerKind::from_path("x.STI"), ContainerKind::Sti);
        assert_eq!(ContainerKind::from_path("x.dat"), ContainerKind::Other);
        assert_eq!(ContainerKind::from_path("noext"), ContainerKind::Other);
    }

    #[test]
    fn test_bin_header_accepted() {
        let mut data = header(Endian::Little, 64, 32, 0x40);
        data.extend_from_slice(&[1u8; 100]);

        let window = HashWindow::resolve(&data, ContainerKind::Bin);
        assert_eq!(window.dialect, HeaderDialect::FixedOffset);
        assert_eq!((window.width, window.height), (64, 32));
        assert_eq!((window.start, window.len), (0x40, 100));
    }

    #[test]
    fn test_bad_resource_start_falls_back() {
        let mut data = header(Endian::Little, 64, 32, 0x80);
        data.extend_from_slice(&[1u8; 100]);

        let window = HashWindow::resolve(&data, ContainerKind::Bin);
        assert_eq!(window, HashWindow::whole(&data));
    }

    #[test]
    fn test_header_needs_payload() {
        let data = header(Endian::Little, 64, 32, 0x40);
        assert_eq!(
            HashWindow::resolve(&data, ContainerKind::Bin),
            HashWindow::whole(&data)
        );
    }

    #[test]
    fn test_sti_header_is_big_endian() {
        let mut data = vec![0xAAu8; 5];
        let mut tagged = header(Endian::Big, 32, 16, 0x40);
        tagged[..4].copy_from_slice(b"GCT0");
        data.extend_from_slice(&tagged);
        data.extend_from_slice(&[0u8; 16]);

        let window = HashWindow::resolve(&data, ContainerKind::Sti);
        assert_eq!(window.dialect, HeaderDialect::Tagged);
        assert_eq!(window.endian, Endian::Big);
        assert_eq!((window.width, window.height), (32, 16));
        assert_eq!((window.start, window.len), (5 + 0x40, 16));
    }

    #[test]
    fn test_sti_without_tag_has_no_header() {
        let data = vec![0u8; 200];
        assert_eq!(locate_header(&data, ContainerKind::Sti), None);
    }

    #[test]
    fn test_secondary_header_narrows_window() {
        let mut data = header(Endian::Little, 16, 16, 0x40);
        data.extend_from_slice(b"K7TX");
        data.extend_from_slice(&10u32.to_le_bytes());
        data.extend_from_slice(&[7u8; 30]);

        let window = HashWindow::resolve(&data, ContainerKind::Bin);
        assert_eq!(window.dialect, HeaderDialect::SecondaryWrapped);
        assert_eq!((window.start, window.len), (0x48, 10));
    }

    #[test]
    fn test_secondary_length_is_clamped() {
        let mut data = header(Endian::Little, 16, 16, 0x40);
        data.extend_from_slice(b"K7TX");
        data.extend_from_slice(&0xFFFF_u32.to_le_bytes());
        data.extend_from_slice(&[7u8; 30]);

        let window = HashWindow::resolve(&data, ContainerKind::Bin);
        assert_eq!((window.start, window.len), (0x48, 30));
        assert_eq!(window.slice(&data).len(), 30);
    }
}
