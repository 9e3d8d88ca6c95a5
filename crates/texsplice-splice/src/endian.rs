//! Whole-file word byte-order reversal.

use std::path::{Path, PathBuf};

use texsplice_common::fs;
use tracing::info;

use crate::paths::{sibling, stem};
use crate::Result;

/// Width of a swapped word.
pub const WORD_SIZE: usize = 4;

/// Reverse the bytes of every `word`-byte group in `data`.
///
/// A trailing partial group is reversed as a unit.
pub fn reverse_words(data: &mut [u8], word: usize) {
    if word < 2 {
        return;
    }
    for chunk in data.chunks_mut(word) {
        chunk.reverse();
    }
}

/// `<stem>_le.bin` next to `path`.
pub fn converted_path(path: &Path) -> Result<PathBuf> {
    Ok(sibling(path, &format!("{}_le.bin", stem(path)?)))
}

/// Write a word-reversed copy of `path` to `<stem>_le.bin`.
pub fn convert_file(path: &Path) -> Result<PathBuf> {
    let mut data = fs::read_file(path)?;
    reverse_words(&mut data, WORD_SIZE);

    let output = converted_path(path)?;
    fs::write_atomic(&output, &data)?;
    info!(path = %output.display(), bytes = data.len(), "converted byte order");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_words() {
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        reverse_words(&mut data, WORD_SIZE);
        assert_eq!(data, vec![4, 3, 2, 1, 8, 7, 6, 5, 10, 9]);
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let original: Vec<u8> = (0..37).collect();
        let mut data = original.clone();
        reverse_words(&mut data, WORD_SIZE);
        reverse_words(&mut data, WORD_SIZE);
        assert_eq!(data, original);
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.gm2");
        std::fs::write(&path, 0x1122_3344u32.to_be_bytes()).unwrap();

        let output = convert_file(&path).unwrap();
        assert_eq!(output, dir.path().join("model_le.bin"));
        assert_eq!(std::fs::read(&output).unwrap(), 0x1122_3344u32.to_le_bytes());
        // Source is left alone
        assert_eq!(std::fs::read(&path).unwrap(), 0x1122_3344u32.to_be_bytes());
    }
}
