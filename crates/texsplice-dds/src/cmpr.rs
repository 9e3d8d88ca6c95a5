//! GameCube CMPR to DXT1 block transcoding.
//!
//! CMPR stores the same 8-byte 4x4 blocks as DXT1, but differs in three ways:
//!
//! - both RGB565 endpoints are big-endian
//! - the sixteen 2-bit indices are packed in the opposite order within
//!   each index byte
//! - blocks are grouped in 2x2 tiles (8x8 pixels) instead of plain rows
//!
//! The byte and bit corrections happen block by block in place; the tile
//! regrouping goes through [`BlockGrid`].

use tracing::debug;

use crate::{Error, Result};

/// Bytes per compressed 4x4 block.
pub const BLOCK_SIZE: usize = 8;

/// Pixels per block edge.
const BLOCK_EDGE: u32 = 4;

/// Index byte remap: reverses the order of the four 2-bit indices.
const INDEX_REMAP: [u8; 256] = build_index_remap();

const fn swap_alternate_bits(value: u8) -> u8 {
    ((value & 0xAA) >> 1) | ((value & 0x55) << 1)
}

const fn build_index_remap() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        // Swapping neighbouring bits and then mirroring the byte leaves each
        // 2-bit index intact but in reverse position
        table[i] = swap_alternate_bits(i as u8).reverse_bits();
        i += 1;
    }
    table
}

/// Why a conversion did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Width or height is zero or not a multiple of 4.
    Dimensions { width: u32, height: u32 },
    /// The source header marks the image as a type that is not CMPR.
    SpecialImageType(u8),
}

/// Result of a conversion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Data was rewritten into DXT1 row-major order.
    Converted(BlockGrid),
    /// Input left untouched.
    NotApplicable(Skip),
}

/// A `width_blocks x height_blocks` grid of compressed blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    /// Blocks per row.
    pub width_blocks: usize,
    /// Block rows.
    pub height_blocks: usize,
}

impl BlockGrid {
    /// Grid for a texture, or `None` if either dimension is zero or not a
    /// multiple of 4.
    pub fn for_texture(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 || width % BLOCK_EDGE != 0 || height % BLOCK_EDGE != 0 {
            return None;
        }
        Some(Self {
            width_blocks: (width / BLOCK_EDGE) as usize,
            height_blocks: (height / BLOCK_EDGE) as usize,
        })
    }

    /// Number of blocks in the grid.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.width_blocks * self.height_blocks
    }

    /// Byte length of the grid in row-major (DXT1) order.
    #[inline]
    pub fn linear_len(&self) -> usize {
        self.block_count() * BLOCK_SIZE
    }

    /// Byte length of the grid in tiled (CMPR) order, tile padding included.
    #[inline]
    pub fn tiled_len(&self) -> usize {
        self.tiles_wide() * self.tiles_high() * 4 * BLOCK_SIZE
    }

    #[inline]
    fn tiles_wide(&self) -> usize {
        (self.width_blocks + 1) / 2
    }

    #[inline]
    fn tiles_high(&self) -> usize {
        (self.height_blocks + 1) / 2
    }

    /// Pairs of (tiled block index, row-major block index), padding omitted.
    fn block_mapping(&self) -> impl Iterator<Item = (usize, usize)> {
        let (width, height) = (self.width_blocks, self.height_blocks);
        let tiles_wide = self.tiles_wide();
        let tile_count = tiles_wide * self.tiles_high();

        (0..tile_count).flat_map(move |tile| {
            let (tile_x, tile_y) = (tile % tiles_wide, tile / tiles_wide);
            (0..4).filter_map(move |sub| {
                let x = tile_x * 2 + sub % 2;
                let y = tile_y * 2 + sub / 2;
                (x < width && y < height).then_some((tile * 4 + sub, y * width + x))
            })
        })
    }

    /// Regroup 2x2-tiled blocks into row-major order.
    pub fn deinterleave(&self, tiled: &[u8]) -> Result<Vec<u8>> {
        check_len(tiled, self.tiled_len())?;
        let mut linear = vec![0u8; self.linear_len()];
        for (src, dst) in self.block_mapping() {
            linear[block_range(dst)].copy_from_slice(&tiled[block_range(src)]);
        }
        Ok(linear)
    }

    /// Inverse of [`deinterleave`](Self::deinterleave). Tile padding is
    /// zero-filled.
    pub fn interleave(&self, linear: &[u8]) -> Result<Vec<u8>> {
        check_len(linear, self.linear_len())?;
        let mut tiled = vec![0u8; self.tiled_len()];
        for (dst, src) in self.block_mapping() {
            tiled[block_range(dst)].copy_from_slice(&linear[block_range(src)]);
        }
        Ok(tiled)
    }
}

#[inline]
fn block_range(index: usize) -> std::ops::Range<usize> {
    index * BLOCK_SIZE..(index + 1) * BLOCK_SIZE
}

fn check_len(data: &[u8], needed: usize) -> Result<()> {
    if data.len() < needed {
        return Err(Error::Truncated {
            needed,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Fix endpoint byte order and index bit order of every whole block.
///
/// Each block is `c0 c0 c1 c1 i0 i1 i2 i3`: the endpoint words are
/// byte-swapped and each index byte goes through the index remap.
/// A trailing partial block is left as is.
pub fn fix_block_order(data: &mut [u8]) {
    for block in data.chunks_exact_mut(BLOCK_SIZE) {
        block.swap(0, 1);
        block.swap(2, 3);
        for index in &mut block[4..] {
            *index = INDEX_REMAP[*index as usize];
        }
    }
}

/// Convert CMPR block data to DXT1 in place.
///
/// On success `data` holds exactly `width * height / 2` bytes in row-major
/// block order. Dimensions that are not multiples of 4 leave `data`
/// untouched and report [`Conversion::NotApplicable`].
pub fn convert_cmpr_to_dxt1(data: &mut Vec<u8>, width: u32, height: u32) -> Result<Conversion> {
    let Some(grid) = BlockGrid::for_texture(width, height) else {
        debug!(width, height, "dimensions not block aligned, skipping");
        return Ok(Conversion::NotApplicable(Skip::Dimensions { width, height }));
    };

    let tiled_len = grid.tiled_len();
    check_len(data, tiled_len)?;

    fix_block_order(&mut data[..tiled_len]);
    *data = grid.deinterleave(&data[..tiled_len])?;

    Ok(Conversion::Converted(grid))
}
