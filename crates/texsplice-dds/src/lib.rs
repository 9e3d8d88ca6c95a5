//! DDS output and CMPR block transcoding for texsplice.
//!
//! GameCube-era textures are stored as CMPR: DXT1-compatible 4x4 blocks with
//! big-endian endpoints, mirrored index bits and 8x8 tile grouping. This
//! crate turns such payloads into plain DXT1 and wraps them in a standard
//! 128-byte DDS header so ordinary image tools can open them.
//!
//! # Example
//!
//! ```no_run
//! use texsplice_dds::{gct0_to_dds, DdsOutput};
//!
//! let data = std::fs::read("texture.bin")?;
//! if let DdsOutput::Dds(dds) = gct0_to_dds(&data)? {
//!     std::fs::write("texture.dds", dds)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod gct0;
mod header;

pub mod cmpr;

pub use cmpr::{convert_cmpr_to_dxt1, BlockGrid, Conversion, Skip};
pub use error::{Error, Result};
pub use gct0::{gct0_to_dds, DdsOutput, Gct0Header};
pub use header::{flags, DdsHeader, DdsPixelFormat, FourCC, DDS_FILE_HEADER_SIZE};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
