// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Block layout and deterministic block enumeration.
//!
//! Bit `k` of the embedded stream always lives in block `k` of
//! [`BlockLayout::iter`], so encoder and decoder must enumerate blocks the
//! same way. Blocks are visited in row-major order: every block of the first
//! block-row left to right, then the next block-row. Rows and columns past
//! the last full block are never visited.

use super::dct::BLOCK_SIZE;

/// Full-block grid of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Number of 8×8 blocks horizontally.
    blocks_wide: usize,
    /// Number of 8×8 blocks vertically.
    blocks_tall: usize,
}

impl BlockLayout {
    /// Layout of full blocks inside a `width × height` image.
    pub fn of(width: usize, height: usize) -> Self {
        Self {
            blocks_wide: width / BLOCK_SIZE,
            blocks_tall: height / BLOCK_SIZE,
        }
    }

    pub fn blocks_wide(&self) -> usize {
        self.blocks_wide
    }

    pub fn blocks_tall(&self) -> usize {
        self.blocks_tall
    }

    /// Total number of full blocks, which is also the capacity in bits.
    pub fn total_blocks(&self) -> usize {
        self.blocks_wide * self.blocks_tall
    }

    /// Coordinate of the block with the given row-major index.
    pub fn coord(&self, index: usize) -> Option<BlockCoord> {
        if index >= self.total_blocks() {
            return None;
        }
        Some(BlockCoord {
            index,
            row: index / self.blocks_wide,
            col: index % self.blocks_wide,
        })
    }

    /// Enumerate all full blocks in row-major order.
    ///
    /// Each call starts a fresh pass; the iterator is `Clone`, so a pass can
    /// also be restarted from any point.
    pub fn iter(&self) -> BlockIter {
        BlockIter { layout: *self, next: 0 }
    }
}

/// Position of one block in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockCoord {
    /// Row-major index, equal to the bit position it carries.
    pub index: usize,
    /// Block row (0-based).
    pub row: usize,
    /// Block column (0-based).
    pub col: usize,
}

impl BlockCoord {
    /// Left pixel column of the block.
    pub fn x(&self) -> usize {
        self.col * BLOCK_SIZE
    }

    /// Top pixel row of the block.
    pub fn y(&self) -> usize {
        self.row * BLOCK_SIZE
    }
}

/// Lazy row-major iterator over [`BlockCoord`]s.
#[derive(Debug, Clone)]
pub struct BlockIter {
    layout: BlockLayout,
    next: usize,
}

impl Iterator for BlockIter {
    type Item = BlockCoord;

    fn next(&mut self) -> Option<BlockCoord> {
        let coord = self.layout.coord(self.next)?;
        self.next += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.layout.total_blocks().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for BlockIter {}
