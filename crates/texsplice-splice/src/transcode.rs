//! GCT0 files to DDS files.

use std::path::{Path, PathBuf};

use texsplice_common::fs;
use texsplice_dds::{gct0_to_dds, DdsOutput, Skip};
use tracing::{debug, info};

use crate::paths::{sibling, stem};
use crate::Result;

/// Outcome of [`transcode_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcoded {
    /// A DDS file was written here.
    Written(PathBuf),
    /// Nothing was written.
    Skipped(Skip),
}

/// Convert the GCT0 texture at `path` into `<stem>.dds` next to it.
pub fn transcode_file(path: &Path) -> Result<Transcoded> {
    let data = fs::read_file(path)?;

    match gct0_to_dds(&data)? {
        DdsOutput::Dds(dds) => {
            let output = sibling(path, &format!("{}.dds", stem(path)?));
            fs::write_atomic(&output, &dds)?;
            info!(path = %output.display(), bytes = dds.len(), "transcoded texture");
            Ok(Transcoded::Written(output))
        }
        DdsOutput::Skipped(skip) => {
            debug!(path = %path.display(), ?skip, "texture not transcoded");
            Ok(Transcoded::Skipped(skip))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texsplice_dds::{DdsHeader, DDS_FILE_HEADER_SIZE};

    fn gct0(image_type: u8, width: u16, height: u16, payload_len: usize) -> Vec<u8> {
        let mut data = vec![0u8; 0x40];
        data[..4].copy_from_slice(b"GCT0");
        data[7] = image_type;
        data[8..10].copy_from_slice(&width.to_be_bytes());
        data[10..12].copy_from_slice(&height.to_be_bytes());
        data.extend((0..payload_len).map(|i| i as u8));
        data
    }

    #[test]
    fn test_transcode_writes_dds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.bin");
        // 8x8 pixels -> 2x2 blocks -> one 32-byte tile
        std::fs::write(&path, gct0(0x0E, 8, 8, 32)).unwrap();

        let result = transcode_file(&path).unwrap();
        let output = dir.path().join("wall.dds");
        assert_eq!(result, Transcoded::Written(output.clone()));

        let dds = std::fs::read(&output).unwrap();
        assert_eq!(dds.len(), DDS_FILE_HEADER_SIZE + 32);
        let header = DdsHeader::parse(&dds).unwrap();
        let (width, height) = (header.width, header.height);
        assert_eq!((width, height), (8, 8));
    }

    #[test]
    fn test_special_image_type_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.bin");
        std::fs::write(&path, gct0(0x06, 8, 8, 32)).unwrap();

        assert_eq!(
            transcode_file(&path).unwrap(),
            Transcoded::Skipped(Skip::SpecialImageType(0x06))
        );
        assert!(!dir.path().join("font.dds").exists());
    }

    #[test]
    fn test_odd_dimensions_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.bin");
        std::fs::write(&path, gct0(0x0E, 65, 64, 4096)).unwrap();

        assert_eq!(
            transcode_file(&path).unwrap(),
            Transcoded::Skipped(Skip::Dimensions {
                width: 65,
                height: 64
            })
        );
    }
}
