//! First-occurrence signature search.
//!
//! Two entry points share the same semantics: [`find`] scans a slice that is
//! already in memory, [`find_in_stream`] scans an arbitrary reader without
//! loading it whole. Both return the offset of the first byte of the first
//! exact match.

use std::io::{self, Read};

use memchr::memmem;

use crate::{Result, Signature};

/// Bytes pulled from a stream per read call.
pub const STREAM_CHUNK: usize = 1024;

/// Find the first occurrence of `signature` in `haystack`.
#[inline]
pub fn find(haystack: &[u8], signature: Signature) -> Option<usize> {
    memmem::find(haystack, signature.as_bytes())
}

/// Find the first occurrence of `signature` at or after `start`.
#[inline]
pub fn find_from(haystack: &[u8], signature: Signature, start: usize) -> Option<usize> {
    if start > haystack.len() {
        return None;
    }
    find(&haystack[start..], signature).map(|pos| start + pos)
}

/// Find the first occurrence of `signature` in a stream.
///
/// The reader is consumed in [`STREAM_CHUNK`] pieces; only the last
/// `signature.len() - 1` bytes of the previous piece are carried over, so a
/// match straddling two reads is still found. Returns the absolute offset
/// from the reader's starting position.
pub fn find_in_stream<R: Read>(mut reader: R, signature: Signature) -> Result<Option<u64>> {
    let needle = signature.as_bytes();
    if needle.is_empty() {
        return Ok(Some(0));
    }

    let finder = memmem::Finder::new(needle);
    let carry = needle.len() - 1;
    let mut chunk = [0u8; STREAM_CHUNK];
    let mut window: Vec<u8> = Vec::with_capacity(STREAM_CHUNK + carry);
    // Absolute offset of window[0]
    let mut window_start: u64 = 0;

    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => return Ok(None),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        window.extend_from_slice(&chunk[..read]);

        if let Some(pos) = finder.find(&window) {
            return Ok(Some(window_start + pos as u64));
        }

        let consumed = window.len().saturating_sub(carry);
        window.drain(..consumed);
        window_start += consumed as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Deterministic filler that never contains a 'D' byte.
    fn noise(len: usize) -> Vec<u8> {
        let mut state: u32 = 0x1234_5678;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                match (state >> 24) as u8 {
                    b'D' => b'E',
                    b => b,
                }
            })
            .collect()
    }

    fn embed(len: usize, at: usize) -> Vec<u8> {
        let mut data = noise(len);
        let sig = Signature::DDS_RESOURCE.as_bytes();
        data[at..at + sig.len()].copy_from_slice(sig);
        data
    }

    #[test]
    fn test_find_embedded_signature() {
        for at in [0usize, 1, 17, 4000, 8187] {
            let data = embed(8192, at);
            assert_eq!(find(&data, Signature::DDS_RESOURCE), Some(at));
        }
    }

    #[test]
    fn test_not_found() {
        let data = noise(5000);
        assert_eq!(find(&data, Signature::DDS_RESOURCE), None);
        assert_eq!(
            find_in_stream(Cursor::new(&data), Signature::DDS_RESOURCE).unwrap(),
            None
        );
    }

    #[test]
    fn test_find_from_skips_earlier_matches() {
        let data = b"DDS xxxxDDS yyyy";
        assert_eq!(find_from(data, Signature::DDS_MAGIC, 0), Some(0));
        assert_eq!(find_from(data, Signature::DDS_MAGIC, 1), Some(8));
        assert_eq!(find_from(data, Signature::DDS_MAGIC, 9), None);
        assert_eq!(find_from(data, Signature::DDS_MAGIC, 100), None);
    }

    #[test]
    fn test_stream_match_across_chunk_boundary() {
        // Starts two bytes before the first chunk ends
        let at = STREAM_CHUNK - 2;
        let data = embed(3 * STREAM_CHUNK, at);
        let found = find_in_stream(Cursor::new(&data), Signature::DDS_RESOURCE).unwrap();
        assert_eq!(found, Some(at as u64));
    }

    #[test]
    fn test_stream_agrees_with_slice() {
        for at in [0usize, 511, 1023, 1024, 2047, 5000] {
            let data = embed(6000, at);
            let streamed = find_in_stream(Cursor::new(&data), Signature::DDS_RESOURCE).unwrap();
            assert_eq!(streamed, find(&data, Signature::DDS_RESOURCE).map(|p| p as u64));
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut data = embed(4096, 3000);
        let sig = Signature::DDS_RESOURCE.as_bytes();
        data[100..100 + sig.len()].copy_from_slice(sig);
        assert_eq!(find(&data, Signature::DDS_RESOURCE), Some(100));
        assert_eq!(
            find_in_stream(Cursor::new(&data), Signature::DDS_RESOURCE).unwrap(),
            Some(100)
        );
    }
}
