//! Fixed byte signatures used to find resources inside containers.

use std::fmt;

/// An immutable byte pattern searched for verbatim.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(&'static [u8]);

impl Signature {
    /// Start of an embedded DDS resource: `"DDS "` followed by the
    /// first byte of the 124-byte header size field.
    pub const DDS_RESOURCE: Self = Self(&[0x44, 0x44, 0x53, 0x20, 0x7C]);

    /// Bare DDS magic, used when splitting archives.
    pub const DDS_MAGIC: Self = Self(b"DDS ");

    /// Marks the end of a resource inside an archive. Doubles as the tag
    /// that opens a JMB texture header.
    pub const RESOURCE_TERMINATOR: Self = Self(&[0x00, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00]);

    /// Big-endian GameCube texture header tag.
    pub const GCT0: Self = Self(b"GCT0");

    /// Secondary sub-header tag placed at the texture start.
    pub const K7TX: Self = Self(b"K7TX");

    /// Wrap an arbitrary static pattern.
    pub const fn new(bytes: &'static [u8]) -> Self {
        Self(bytes)
    }

    /// The raw pattern bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        self.0
    }

    /// Pattern length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty pattern.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
