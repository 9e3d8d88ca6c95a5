//! Error types for texsplice-common.

use std::path::PathBuf;

use thiserror::Error;

/// Common error type for texsplice operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A file could not be opened, read or created.
    #[error("cannot access {}: {source}", path.display())]
    Unopenable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A finished temporary file could not replace its destination.
    #[error("cannot commit {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
