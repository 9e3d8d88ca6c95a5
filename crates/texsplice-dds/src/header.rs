//! DDS header structures.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result, DDS_MAGIC};

/// Size of magic plus header, i.e. the offset of the first payload byte.
pub const DDS_FILE_HEADER_SIZE: usize = 4 + DdsHeader::SIZE as usize;

/// `dwFlags` bits.
pub mod flags {
    /// `DDSD_CAPS`
    pub const CAPS: u32 = 0x1;
    /// `DDSD_HEIGHT`
    pub const HEIGHT: u32 = 0x2;
    /// `DDSD_WIDTH`
    pub const WIDTH: u32 = 0x4;
    /// `DDSD_PIXELFORMAT`
    pub const PIXEL_FORMAT: u32 = 0x1000;
    /// `DDSD_LINEARSIZE`
    pub const LINEAR_SIZE: u32 = 0x80000;
    /// `DDPF_FOURCC`
    pub const FOURCC: u32 = 0x4;
    /// `DDSCAPS_TEXTURE`
    pub const CAPS_TEXTURE: u32 = 0x1000;
}

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Header for a single-surface DXT1 texture without mipmaps.
    pub fn dxt1(width: u32, height: u32) -> Self {
        Self {
            size: Self::SIZE,
            flags: flags::CAPS
                | flags::HEIGHT
                | flags::WIDTH
                | flags::PIXEL_FORMAT
                | flags::LINEAR_SIZE,
            height,
            width,
            pitch_or_linear_size: width.saturating_mul(height) / 2,
            depth: 0,
            mipmap_count: 0,
            reserved1: [0; 11],
            pixel_format: DdsPixelFormat {
                size: DdsPixelFormat::SIZE,
                flags: flags::FOURCC,
                four_cc: FourCC::DXT1,
                rgb_bit_count: 0,
                r_bit_mask: 0,
                g_bit_mask: 0,
                b_bit_mask: 0,
                a_bit_mask: 0,
            },
            caps: flags::CAPS_TEXTURE,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    /// Parse the magic and header at the start of a DDS file.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < DDS_FILE_HEADER_SIZE {
            return Err(Error::InvalidHeader(format!(
                "file too small: {} bytes",
                data.len()
            )));
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if &magic != DDS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        Self::read_from_bytes(&data[4..DDS_FILE_HEADER_SIZE])
            .map_err(|_| Error::InvalidHeader("header size mismatch".into()))
    }

    /// Magic followed by the header, ready to be prepended to a payload.
    pub fn to_file_bytes(&self) -> [u8; DDS_FILE_HEADER_SIZE] {
        let mut out = [0u8; DDS_FILE_HEADER_SIZE];
        out[..4].copy_from_slice(DDS_MAGIC);
        out[4..].copy_from_slice(self.as_bytes());
        out
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
}
