//! Common utilities for texsplice.
//!
//! This crate provides the building blocks shared by every texsplice crate:
//!
//! - [`BinaryReader`] and [`Endian`] - bounds-checked, endian-explicit reading
//! - [`Signature`] - the fixed byte patterns used to find embedded resources
//! - [`locate`] - first-occurrence search over slices and streams
//! - [`fs`] - whole-file reads and all-or-nothing writes

mod error;
mod reader;
mod signature;

pub mod fs;
pub mod locate;

pub use error::{Error, Result};
pub use reader::{BinaryReader, Endian};
pub use signature::Signature;

/// Re-export memchr for SIMD-accelerated byte searching
pub use memchr;
