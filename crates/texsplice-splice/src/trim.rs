//! Trailer removal and fingerprint renaming.

use std::path::{Path, PathBuf};

use texsplice_common::{fs, Error as CommonError};
use texsplice_fingerprint::{ContainerKind, Fingerprint};
use tracing::{info, warn};

use crate::paths::sibling;
use crate::{Error, Result};

/// Bytes dropped from the end of each file.
pub const TRAILER_LEN: usize = 16;

/// Outcome of [`fix_and_rename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimmed {
    /// Where the trimmed file now lives.
    pub path: PathBuf,
    /// Fingerprint of the trimmed bytes.
    pub fingerprint: Fingerprint,
    /// Whether the file was renamed.
    pub renamed: bool,
}

/// Drop the trailer of `path` and rename it to `<fingerprint>.bin`.
///
/// The trimmed bytes are committed in place first. Without a usable
/// fingerprint name the file keeps its original name.
pub fn fix_and_rename(path: &Path) -> Result<Trimmed> {
    let data = fs::read_file(path)?;
    if data.len() < TRAILER_LEN {
        return Err(Error::TooSmall {
            needed: TRAILER_LEN,
            actual: data.len(),
        });
    }

    let trimmed = &data[..data.len() - TRAILER_LEN];
    fs::write_atomic(path, trimmed)?;

    let fingerprint = Fingerprint::compute(trimmed, ContainerKind::from_path(path));
    let Some(name) = fingerprint.display_name() else {
        warn!(
            path = %path.display(),
            digest = format_args!("{:08x}", fingerprint.digest),
            "no dimensions for fingerprint, keeping name"
        );
        return Ok(Trimmed {
            path: path.to_path_buf(),
            fingerprint,
            renamed: false,
        });
    };

    let target = sibling(path, &format!("{}.bin", name));
    std::fs::rename(path, &target).map_err(|source| CommonError::Persist {
        path: target.clone(),
        source,
    })?;
    info!(from = %path.display(), to = %target.display(), "trimmed and renamed");

    Ok(Trimmed {
        path: target,
        fingerprint,
        renamed: true,
    })
}
