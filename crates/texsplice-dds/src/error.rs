//! Error types for DDS handling.

use thiserror::Error;

/// Errors that can occur when building or transcoding textures.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] texsplice_common::Error),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Invalid DDS or source texture header.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Block payload shorter than its grid requires.
    #[error("truncated block payload: expected {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
