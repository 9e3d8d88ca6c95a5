//! GCT0 texture files and their conversion to DXT1 DDS.
//!
//! A GCT0 file starts with a big-endian 0x40-byte header followed directly by
//! CMPR block data:
//!
//! - `0x07`: image type byte
//! - `0x08`: width (u16)
//! - `0x0A`: height (u16)
//! - `0x40`: first payload byte

use texsplice_common::{BinaryReader, Endian};
use tracing::debug;

use crate::cmpr::{convert_cmpr_to_dxt1, BlockGrid, Conversion, Skip};
use crate::header::DdsHeader;
use crate::Result;

/// Parsed GCT0 header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gct0Header {
    /// Image type byte.
    pub image_type: u8,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl Gct0Header {
    /// Offset of the block payload.
    pub const PAYLOAD_OFFSET: usize = 0x40;

    /// Image type whose payload is not CMPR.
    pub const SPECIAL_IMAGE_TYPE: u8 = 0x06;

    /// Parse the header fields from the start of a file.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new_at(data, 7).with_endian(Endian::Big);
        let image_type = reader.read_u8()?;
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;

        Ok(Self {
            image_type,
            width,
            height,
        })
    }
}

/// Outcome of [`gct0_to_dds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdsOutput {
    /// A complete DDS file.
    Dds(Vec<u8>),
    /// The file was not converted.
    Skipped(Skip),
}

/// Convert a GCT0 CMPR texture into a DXT1 DDS file.
pub fn gct0_to_dds(data: &[u8]) -> Result<DdsOutput> {
    let header = Gct0Header::parse(data)?;
    let (width, height) = (u32::from(header.width), u32::from(header.height));

    if header.image_type == Gct0Header::SPECIAL_IMAGE_TYPE {
        debug!(image_type = header.image_type, "not a CMPR image");
        return Ok(DdsOutput::Skipped(Skip::SpecialImageType(header.image_type)));
    }

    let Some(grid) = BlockGrid::for_texture(width, height) else {
        return Ok(DdsOutput::Skipped(Skip::Dimensions { width, height }));
    };

    let payload = BinaryReader::new_at(data, Gct0Header::PAYLOAD_OFFSET).read_bytes(grid.tiled_len())?;
    let mut blocks = payload.to_vec();

    match convert_cmpr_to_dxt1(&mut blocks, width, height)? {
        Conversion::Converted(_) => {}
        Conversion::NotApplicable(skip) => return Ok(DdsOutput::Skipped(skip)),
    }

    let mut out = Vec::with_capacity(crate::DDS_FILE_HEADER_SIZE + blocks.len());
    out.extend_from_slice(&DdsHeader::dxt1(width, height).to_file_bytes());
    out.extend_from_slice(&blocks);

    debug!(width, height, bytes = out.len(), "converted GCT0 to DDS");
    Ok(DdsOutput::Dds(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DDS_FILE_HEADER_SIZE;

    fn gct0(image_type: u8, width: u16, height: u16, payload: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; Gct0Header::PAYLOAD_OFFSET];
        data[..4].copy_from_slice(b"GCT0");
        data[7] = image_type;
        data[8..10].copy_from_slice(&width.to_be_bytes());
        data[10..12].copy_from_slice(&height.to_be_bytes());
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_parse_header() {
        let data = gct0(0x0E, 0x0100, 0x0080, &[]);
        let header = Gct0Header::parse(&data).unwrap();
        assert_eq!(
            header,
            Gct0Header {
                image_type: 0x0E,
                width: 256,
                height: 128
            }
        );
    }

    #[test]
    fn test_convert_to_dds() {
        // 16x8: two tiles, blocks tagged by their first endpoint byte
        let payload: Vec<u8> = (0..8u8)
            .flat_map(|i| [0x00, i, 0, 0, 0, 0, 0, 0])
            .collect();
        let data = gct0(0x0E, 16, 8, &payload);

        let DdsOutput::Dds(dds) = gct0_to_dds(&data).unwrap() else {
            panic!("expected DDS output");
        };

        assert_eq!(dds.len(), DDS_FILE_HEADER_SIZE + 64);
        let header = DdsHeader::parse(&dds).unwrap();
        let (width, height, linear) = (header.width, header.height, header.pitch_or_linear_size);
        assert_eq!((width, height, linear), (16, 8, 64));

        let order: Vec<u8> = dds[DDS_FILE_HEADER_SIZE..]
            .chunks_exact(8)
            .map(|b| b[0])
            .collect();
        assert_eq!(order, vec![0, 1, 4, 5, 2, 3, 6, 7]);
    }

    #[test]
    fn test_special_image_type_is_skipped() {
        let data = gct0(Gct0Header::SPECIAL_IMAGE_TYPE, 8, 8, &[0u8; 32]);
        assert_eq!(
            gct0_to_dds(&data).unwrap(),
            DdsOutput::Skipped(Skip::SpecialImageType(0x06))
        );
    }

    #[test]
    fn test_unaligned_dimensions_are_skipped() {
        let data = gct0(0x0E, 65, 64, &[0u8; 4096]);
        assert_eq!(
            gct0_to_dds(&data).unwrap(),
            DdsOutput::Skipped(Skip::Dimensions {
                width: 65,
                height: 64
            })
        );
    }

    #[test]
    fn test_short_payload_is_an_error() {
        let data = gct0(0x0E, 64, 64, &[0u8; 100]);
        assert!(gct0_to_dds(&data).is_err());
    }
}
