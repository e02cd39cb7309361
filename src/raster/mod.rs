// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Single-channel sample grid and its 8×8 block view.
//!
//! [`LumaImage`] holds luminance samples as `f64` in row-major order. The
//! codec never rounds or clamps; conversion to 8-bit happens only in [`io`].

pub mod blocks;
pub mod dct;
pub mod error;
pub mod io;

use crate::stego::error::StegoError;
use blocks::{BlockCoord, BlockLayout};
use dct::{Block, BLOCK_LEN, BLOCK_SIZE};

/// Grayscale image with floating-point samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LumaImage {
    width: usize,
    height: usize,
    /// Flat storage: height * width samples, row-major.
    samples: Vec<f64>,
}

impl LumaImage {
    /// Create an image filled with a constant value.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major sample buffer.
    ///
    /// # Errors
    /// [`StegoError::SizeMismatch`] if `samples.len() != width * height`.
    pub fn from_samples(width: usize, height: usize, samples: Vec<f64>) -> Result<Self, StegoError> {
        let expected = width * height;
        if samples.len() != expected {
            return Err(StegoError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self { width, height, samples })
    }

    /// Build from 8-bit samples, row-major.
    ///
    /// # Errors
    /// [`StegoError::SizeMismatch`] if `pixels.len() != width * height`.
    pub fn from_u8(width: usize, height: usize, pixels: &[u8]) -> Result<Self, StegoError> {
        Self::from_samples(width, height, pixels.iter().map(|&p| p as f64).collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.samples[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let idx = self.index(x, y);
        self.samples[idx] = value;
    }

    /// Full-block layout of this image.
    pub fn layout(&self) -> BlockLayout {
        BlockLayout::of(self.width, self.height)
    }

    /// Copy the 64 samples of one block out of the image.
    pub fn read_block(&self, coord: BlockCoord) -> Block {
        let mut block = [0.0f64; BLOCK_LEN];
        for row in 0..BLOCK_SIZE {
            let start = self.index(coord.x(), coord.y() + row);
            block[row * BLOCK_SIZE..(row + 1) * BLOCK_SIZE]
                .copy_from_slice(&self.samples[start..start + BLOCK_SIZE]);
        }
        block
    }

    /// Write 64 samples back at the block's original location.
    pub fn write_block(&mut self, coord: BlockCoord, block: &Block) {
        for row in 0..BLOCK_SIZE {
            let start = self.index(coord.x(), coord.y() + row);
            self.samples[start..start + BLOCK_SIZE]
                .copy_from_slice(&block[row * BLOCK_SIZE..(row + 1) * BLOCK_SIZE]);
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width, "x {x} >= {}", self.width);
        debug_assert!(y < self.height, "y {y} >= {}", self.height);
        y * self.width + x
    }
}
