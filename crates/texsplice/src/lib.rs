//! Texsplice - texture extraction and reinsertion for game containers.
//!
//! This crate provides a unified interface to the texsplice library
//! ecosystem.
//!
//! # Crates
//!
//! - [`texsplice_common`] - Binary reading, signatures, pattern search, atomic writes
//! - [`texsplice_dds`] - DDS headers and CMPR to DXT1 transcoding
//! - [`texsplice_fingerprint`] - Content fingerprints with header dialect detection
//! - [`texsplice_splice`] - Extract, reimport and batch operations on files
//!
//! # Example
//!
//! ```no_run
//! use texsplice::prelude::*;
//!
//! let data = std::fs::read("st00.bin")?;
//! let offset = locate_resource(&data)?;
//! let fingerprint = Fingerprint::compute(&data, ContainerKind::Bin);
//!
//! println!("resource at {offset:#x}, name {:?}", fingerprint.display_name());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use texsplice_common as common;
pub use texsplice_dds as dds;
pub use texsplice_fingerprint as fingerprint;
pub use texsplice_splice as splice;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use texsplice_common::{locate, BinaryReader, Endian, Signature};
    pub use texsplice_dds::{convert_cmpr_to_dxt1, gct0_to_dds, DdsHeader, DdsOutput};
    pub use texsplice_fingerprint::{ContainerKind, Fingerprint, HashWindow};
    pub use texsplice_splice::{
        extract_archive_file, extract_file, extract_file_hashed, fix_and_rename,
        locate_resource, reimport_bytes, reimport_file, transcode_file, ResourceExtent,
        TailPolicy,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
