//! Endian-aware binary reader over byte slices.
//!
//! Container headers come in little- and big-endian dialects, so every
//! multi-byte read goes through an explicit [`Endian`] instead of
//! reinterpreting the buffer as native integers.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::{Error, Result};

/// Byte order of a multi-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

impl Endian {
    /// Decode a u16 from the first two bytes of `bytes`.
    ///
    /// Panics if `bytes` is shorter than two bytes.
    #[inline]
    pub fn u16(self, bytes: &[u8]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(bytes),
            Endian::Big => BigEndian::read_u16(bytes),
        }
    }

    /// Decode a u32 from the first four bytes of `bytes`.
    ///
    /// Panics if `bytes` is shorter than four bytes.
    #[inline]
    pub fn u32(self, bytes: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(bytes),
            Endian::Big => BigEndian::read_u32(bytes),
        }
    }
}

/// A cursor over a byte slice that decodes integers in a fixed byte order.
///
/// # Example
///
/// ```
/// use texsplice_common::{BinaryReader, Endian};
///
/// let data = [0x00, 0x40, 0x01, 0x02, 0x03, 0x04];
/// let mut reader = BinaryReader::new(&data).with_endian(Endian::Big);
///
/// assert_eq!(reader.read_u16().unwrap(), 0x0040);
/// assert_eq!(reader.read_u32().unwrap(), 0x01020304);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
    endian: Endian,
}

impl<'a> BinaryReader<'a> {
    /// Create a new little-endian reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            endian: Endian::Little,
        }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self {
            data,
            position,
            endian: Endian::Little,
        }
    }

    /// Switch the byte order used for subsequent reads.
    #[inline]
    pub const fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Current offset into the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the cursor.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Whether the cursor is at or past the end.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Skip `count` bytes.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// The next `count` bytes, leaving the cursor in place.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// The next `count` bytes, moving the cursor past them.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a u16 in the reader's byte order.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let endian = self.endian;
        self.read_bytes(2).map(|b| endian.u16(b))
    }

    /// Read a u32 in the reader's byte order.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let endian = self.endian;
        self.read_bytes(4).map(|b| endian.u32(b))
    }

    /// Read a u16 at an absolute offset without moving the cursor.
    #[inline]
    pub fn u16_at(&self, offset: usize) -> Result<u16> {
        BinaryReader::new_at(self.data, offset)
            .with_endian(self.endian)
            .read_u16()
    }

    /// Read a u32 at an absolute offset without moving the cursor.
    #[inline]
    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        BinaryReader::new_at(self.data, offset)
            .with_endian(self.endian)
            .read_u32()
    }

    /// Check whether the next bytes equal `expected`, without advancing.
    #[inline]
    pub fn peek_matches(&self, expected: &[u8]) -> bool {
        self.peek_bytes(expected.len())
            .map(|actual| actual == expected)
            .unwrap_or(false)
    }
}
