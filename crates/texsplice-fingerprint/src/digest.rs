//! Sampled 32-bit payload digest.
//!
//! A MurmurHash3-style mix over a deterministic subsample of the payload:
//! at most ~64 evenly spaced words are mixed, then the trailing bytes and
//! the length are folded in and the result goes through the Murmur3
//! finalizer. Texture payloads can be many megabytes, and the subsample
//! keeps naming cost flat.

use texsplice_common::Endian;

/// Initial hash value.
pub const SEED: u32 = 0xDEAD_BEEF;

/// Number of words the sampling stride aims for.
pub const SAMPLE_TARGET: usize = 0x40;

const C1: u32 = 0xCC9E_2D51;
const C2: u32 = 0x1B87_3593;
const ROUND_ADD: u32 = 0xFADD_AF14;
const ROUND_MUL: u32 = 5;
const FMIX1: u32 = 0x85EB_CA6B;
const FMIX2: u32 = 0xC2B2_AE35;

#[inline]
fn mix_word(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
fn fmix(mut h: u32) -> u32 {
    h = (h ^ (h >> 16)).wrapping_mul(FMIX1);
    h = (h ^ (h >> 13)).wrapping_mul(FMIX2);
    h ^ (h >> 16)
}

/// Word stride for a window of `word_count` whole words.
#[inline]
pub fn sample_stride(word_count: usize) -> usize {
    (word_count / SAMPLE_TARGET).max(1)
}

/// Digest `window`, decoding sampled words in `endian` order.
///
/// Trailing bytes that do not fill a word are packed least significant
/// byte first regardless of `endian`, as unsigned values.
pub fn digest(window: &[u8], endian: Endian) -> u32 {
    let word_count = window.len() / 4;
    let stride = sample_stride(word_count);

    let mut hash = SEED;
    for word in window.chunks_exact(4).step_by(stride) {
        let k = mix_word(endian.u32(word));
        hash = (hash ^ k)
            .rotate_left(13)
            .wrapping_add(ROUND_ADD)
            .wrapping_mul(ROUND_MUL);
    }

    let tail = &window[word_count * 4..];
    let extra = tail
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i)));
    if extra != 0 {
        hash ^= mix_word(extra);
    }

    // Length is folded in modulo 2^32
    hash ^= window.len() as u32;
    fmix(hash)
}
