//! Byte-exact texture extraction and reinsertion.
//!
//! Game containers embed a DDS resource somewhere after a header of unknown
//! layout. This crate finds that resource by signature, copies it out, and
//! splices a replacement back in without disturbing the surrounding bytes.
//! It also carries the batch operations built on the same primitives:
//!
//! - [`splice`] - single-resource extract and reimport
//! - [`archive`] - multi-resource archives split on a terminator
//! - [`trim`] - trailer removal and fingerprint renaming
//! - [`endian`] - whole-file word byte-order reversal
//! - [`transcode`] - GCT0 CMPR files to DXT1 DDS files
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use texsplice_splice::{extract_file, reimport_file, TailPolicy};
//!
//! let container = Path::new("st00.bin");
//! let extracted = extract_file(container)?;
//! // ... edit the extracted DDS ...
//! reimport_file(container, &extracted.path, TailPolicy::default())?;
//! # Ok::<(), texsplice_splice::Error>(())
//! ```

mod error;

pub mod archive;
pub mod endian;
pub mod paths;
pub mod splice;
pub mod transcode;
pub mod trim;

pub use archive::{extract_archive_file, split_archive, ArchiveResource, ARCHIVE_PREFIX_LEN};
pub use endian::{convert_file, reverse_words, WORD_SIZE};
pub use error::{Error, Result};
pub use paths::{archive_entry_path, extracted_path};
pub use splice::{
    extract_file, extract_file_hashed, extract_file_to, locate_resource, reimport_bytes,
    reimport_file, terminated_extent, Extracted, Reimported, ResourceExtent, TailPolicy,
};
pub use transcode::{transcode_file, Transcoded};
pub use trim::{fix_and_rename, Trimmed, TRAILER_LEN};
