//! Content fingerprints for texture payloads.
//!
//! A fingerprint names a texture by what it contains rather than where it was
//! found: the header's width and height plus a sampled 32-bit digest of the
//! pixel payload, rendered as `WWWWxHHHH_<hex>`. Identical bytes always yield
//! the same name, which lets replacement textures be matched to their
//! originals across runs.
//!
//! # Example
//!
//! ```
//! use texsplice_fingerprint::{ContainerKind, Fingerprint};
//!
//! let mut data = vec![0u8; 0x40];
//! data[8..10].copy_from_slice(&64u16.to_le_bytes());
//! data[10..12].copy_from_slice(&64u16.to_le_bytes());
//! data[0x10..0x14].copy_from_slice(&0x40u32.to_le_bytes());
//! data.extend((0..4096u32).map(|i| (i % 251) as u8));
//!
//! let fingerprint = Fingerprint::compute(&data, ContainerKind::Bin);
//! assert_eq!(fingerprint.display_name().as_deref(), Some("0064x0064_79cc5ace"));
//! ```

pub mod dialect;
pub mod digest;

pub use dialect::{ContainerKind, HashWindow, HeaderDialect, HeaderLocation};
pub use digest::digest;

/// Largest dimension (exclusive) that still produces a display name.
pub const MAX_DIMENSION: u16 = 10_000;

/// Dimensions plus payload digest of one texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    /// Width from the header, 0 when unknown.
    pub width: u16,
    /// Height from the header, 0 when unknown.
    pub height: u16,
    /// Payload digest.
    pub digest: u32,
    /// Dialect the digest window came from.
    pub dialect: HeaderDialect,
}

impl Fingerprint {
    /// Fingerprint a whole container, detecting its header from `kind`.
    pub fn compute(data: &[u8], kind: ContainerKind) -> Self {
        Self::from_window(data, HashWindow::resolve(data, kind))
    }

    /// Fingerprint an already resolved window.
    pub fn from_window(data: &[u8], window: HashWindow) -> Self {
        Self {
            width: window.width,
            height: window.height,
            digest: digest(window.slice(data), window.endian),
            dialect: window.dialect,
        }
    }

    /// Whether both dimensions fall in `1..10000`.
    pub fn has_dimensions(&self) -> bool {
        (1..MAX_DIMENSION).contains(&self.width) && (1..MAX_DIMENSION).contains(&self.height)
    }

    /// `WWWWxHHHH_<hex digest>`, or `None` without valid dimensions.
    pub fn display_name(&self) -> Option<String> {
        self.has_dimensions()
            .then(|| format!("{:04}x{:04}_{:x}", self.width, self.height, self.digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_header(width: u16, height: u16, resource_start: u32) -> Vec<u8> {
        let mut data = vec![0u8; 0x40];
        data[8..10].copy_from_slice(&width.to_le_bytes());
        data[10..12].copy_from_slice(&height.to_le_bytes());
        data[0x10..0x14].copy_from_slice(&resource_start.to_le_bytes());
        data
    }

    fn golden_payload() -> Vec<u8> {
        (0..4096u32).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_golden_bin() {
        let mut data = le_header(64, 64, 0x40);
        data.extend_from_slice(&golden_payload());

        let fingerprint = Fingerprint::compute(&data, ContainerKind::Bin);
        assert_eq!(fingerprint.dialect, HeaderDialect::FixedOffset);
        assert_eq!(fingerprint.digest, 0x79CC_5ACE);
        assert_eq!(
            fingerprint.display_name().as_deref(),
            Some("0064x0064_79cc5ace")
        );
    }

    #[test]
    fn test_rejected_header_hashes_whole_file() {
        let mut data = le_header(64, 64, 0x80);
        data.extend_from_slice(&golden_payload());

        let fingerprint = Fingerprint::compute(&data, ContainerKind::Bin);
        assert_eq!(fingerprint.dialect, HeaderDialect::None);
        assert_eq!((fingerprint.width, fingerprint.height), (0, 0));
        assert_eq!(fingerprint.digest, 0x7B67_DE9E);
        assert_eq!(fingerprint.display_name(), None);
    }

    #[test]
    fn test_jmb_header_after_prefix() {
        let mut data = vec![0x11u8; 10];
        let mut header = le_header(128, 256, 0x40);
        header[..8].copy_from_slice(&[0, 0, 0, 0, 6, 0, 0, 0]);
        data.extend_from_slice(&header);
        data.extend((0..1000u32).map(|i| (i * 31 + 5) as u8));

        let fingerprint = Fingerprint::compute(&data, ContainerKind::Jmb);
        assert_eq!(
            fingerprint.display_name().as_deref(),
            Some("0128x0256_79306c17")
        );
    }

    #[test]
    fn test_sti_tagged_big_endian() {
        let mut data = vec![1u8, 2, 3];
        let mut header = vec![0u8; 0x40];
        header[..4].copy_from_slice(b"GCT0");
        header[8..10].copy_from_slice(&32u16.to_be_bytes());
        header[10..12].copy_from_slice(&16u16.to_be_bytes());
        header[0x10..0x14].copy_from_slice(&0x40u32.to_be_bytes());
        data.extend_from_slice(&header);
        data.extend((0..256u32).map(|i| (i * 7 + 3) as u8));

        let fingerprint = Fingerprint::compute(&data, ContainerKind::Sti);
        assert_eq!(fingerprint.dialect, HeaderDialect::Tagged);
        assert_eq!(
            fingerprint.display_name().as_deref(),
            Some("0032x0016_aa1332cb")
        );
    }

    #[test]
    fn test_k7tx_wrapped_payload() {
        let mut data = le_header(64, 64, 0x40);
        data.extend_from_slice(b"K7TX");
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend((0..100u32).map(|i| (i * 13 + 1) as u8));
        data.extend_from_slice(&[0xEE; 20]);

        let fingerprint = Fingerprint::compute(&data, ContainerKind::Bin);
        assert_eq!(fingerprint.dialect, HeaderDialect::SecondaryWrapped);
        assert_eq!(
            fingerprint.display_name().as_deref(),
            Some("0064x0064_35920aab")
        );
    }

    #[test]
    fn test_unknown_extension_hashes_whole_file() {
        let mut data = le_header(64, 64, 0x40);
        data.extend_from_slice(&golden_payload());

        let fingerprint = Fingerprint::compute(&data, ContainerKind::Other);
        assert_eq!(fingerprint.dialect, HeaderDialect::None);
        assert_eq!(fingerprint.digest, digest(&data, texsplice_common::Endian::Little));
    }

    #[test]
    fn test_display_name_bounds() {
        let mut fingerprint = Fingerprint {
            width: 9999,
            height: 1,
            digest: 0xABC,
            dialect: HeaderDialect::FixedOffset,
        };
        assert_eq!(fingerprint.display_name().as_deref(), Some("9999x0001_abc"));

        fingerprint.width = 10_000;
        assert_eq!(fingerprint.display_name(), None);

        fingerprint.width = 0;
        assert_eq!(fingerprint.display_name(), None);
    }
}
