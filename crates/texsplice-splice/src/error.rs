//! Error types for splice operations.

use std::path::PathBuf;

use texsplice_common::Signature;
use thiserror::Error;

/// Errors that abort a single file operation.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] texsplice_common::Error),

    /// DDS or transcoding error.
    #[error("{0}")]
    Dds(#[from] texsplice_dds::Error),

    /// The resource signature does not occur in the container.
    #[error("signature {signature} not found")]
    SignatureNotFound { signature: Signature },

    /// The file is shorter than the operation requires.
    #[error("file too small: need at least {needed} bytes, got {actual}")]
    TooSmall { needed: usize, actual: usize },

    /// No replacement resource exists for a container.
    #[error("replacement resource not found: {}", .0.display())]
    MissingReplacement(PathBuf),

    /// The path has no usable file name.
    #[error("path has no file name: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Result type for splice operations.
pub type Result<T> = std::result::Result<T, Error>;
