// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Orthonormal 8×8 block DCT.
//!
//! [`forward`] maps 64 spatial samples to 64 frequency coefficients and
//! [`inverse`] maps them back. Both use natural (row-major) order, i.e.
//! index = row * 8 + col, and the orthonormal scaling so that
//! `inverse(forward(b)) == b` up to floating-point rounding.
//!
//! No level shift or quantization is applied: coefficients are a pure
//! embedding substrate here.
//!
//! The pipeline works on fixed [`Block`] arrays. [`forward_slice`] and
//! [`inverse_slice`] accept caller-owned slices and reject wrong lengths.

use std::sync::OnceLock;

use crate::stego::error::StegoError;

/// Side length of a block in samples.
pub const BLOCK_SIZE: usize = 8;

/// Number of samples (and coefficients) in one block.
pub const BLOCK_LEN: usize = BLOCK_SIZE * BLOCK_SIZE;

/// 64 spatial samples or 64 DCT coefficients, row-major.
pub type Block = [f64; BLOCK_LEN];

/// `COSINE[u][x] = cos((2*x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; BLOCK_SIZE]; BLOCK_SIZE]> = OnceLock::new();

/// C(0) = 1/sqrt(8), C(u>0) = 1/2.
static NORM: OnceLock<[f64; BLOCK_SIZE]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; BLOCK_SIZE]; BLOCK_SIZE] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0).cos();
            }
        }
        table
    })
}

fn norm_table() -> &'static [f64; BLOCK_SIZE] {
    NORM.get_or_init(|| {
        let mut n = [0.5f64; BLOCK_SIZE];
        n[0] = 1.0 / (BLOCK_SIZE as f64).sqrt();
        n
    })
}

/// Forward 2D DCT-II of one block.
pub fn forward(samples: &Block) -> Block {
    let cos = cosine_table();
    let c = norm_table();

    // Rows first.
    let mut temp = [0.0f64; BLOCK_LEN];
    for row in 0..BLOCK_SIZE {
        for u in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for x in 0..BLOCK_SIZE {
                sum += samples[row * BLOCK_SIZE + x] * cos[u][x];
            }
            temp[row * BLOCK_SIZE + u] = c[u] * sum;
        }
    }

    // Then columns.
    let mut coeffs = [0.0f64; BLOCK_LEN];
    for col in 0..BLOCK_SIZE {
        for v in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for y in 0..BLOCK_SIZE {
                sum += temp[y * BLOCK_SIZE + col] * cos[v][y];
            }
            coeffs[v * BLOCK_SIZE + col] = c[v] * sum;
        }
    }

    coeffs
}

/// Inverse 2D DCT (DCT-III) of one coefficient block.
pub fn inverse(coeffs: &Block) -> Block {
    let cos = cosine_table();
    let c = norm_table();

    // Columns first (undo the last forward pass).
    let mut temp = [0.0f64; BLOCK_LEN];
    for col in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for v in 0..BLOCK_SIZE {
                sum += c[v] * coeffs[v * BLOCK_SIZE + col] * cos[v][y];
            }
            temp[y * BLOCK_SIZE + col] = sum;
        }
    }

    let mut samples = [0.0f64; BLOCK_LEN];
    for row in 0..BLOCK_SIZE {
        for x in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for u in 0..BLOCK_SIZE {
                sum += c[u] * temp[row * BLOCK_SIZE + u] * cos[u][x];
            }
            samples[row * BLOCK_SIZE + x] = sum;
        }
    }

    samples
}

/// Forward DCT of a dynamically sized slice.
///
/// # Errors
/// [`StegoError::SizeMismatch`] unless `samples.len() == 64`.
pub fn forward_slice(samples: &[f64]) -> Result<Block, StegoError> {
    let block: &Block = samples.try_into().map_err(|_| StegoError::SizeMismatch {
        expected: BLOCK_LEN,
        actual: samples.len(),
    })?;
    Ok(forward(block))
}

/// Inverse DCT of a dynamically sized slice.
///
/// # Errors
/// [`StegoError::SizeMismatch`] unless `coeffs.len() == 64`.
pub fn inverse_slice(coeffs: &[f64]) -> Result<Block, StegoError> {
    let block: &Block = coeffs.try_into().map_err(|_| StegoError::SizeMismatch {
        expected: BLOCK_LEN,
        actual: coeffs.len(),
    })?;
    Ok(inverse(block))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_block() -> Block {
        let mut b = [0.0f64; BLOCK_LEN];
        for (i, v) in b.iter_mut().enumerate() {
            *v = ((i * 37) % 256) as f64;
        }
        b
    }

    #[test]
    fn roundtrip_within_epsilon() {
        let block = ramp_block();
        let recovered = inverse(&forward(&block));
        for i in 0..BLOCK_LEN {
            assert!(
                (block[i] - recovered[i]).abs() < 1e-9,
                "Mismatch at index {i}: expected {}, got {}",
                block[i],
                recovered[i]
            );
        }
    }

    #[test]
    fn flat_block_is_dc_only() {
        let block = [100.0f64; BLOCK_LEN];
        let coeffs = forward(&block);
        // DC = 1/sqrt(8) * 1/sqrt(8) * 64 * 100 = 800
        assert!((coeffs[0] - 800.0).abs() < 1e-9);
        for (i, c) in coeffs.iter().enumerate().skip(1) {
            assert!(c.abs() < 1e-9, "AC coefficient {i} = {c}");
        }
    }

    #[test]
    fn single_coefficient_inverse_is_unit_energy() {
        let mut coeffs = [0.0f64; BLOCK_LEN];
        coeffs[4 * BLOCK_SIZE + 5] = 1.0;
        let samples = inverse(&coeffs);
        let energy: f64 = samples.iter().map(|s| s * s).sum();
        assert!((energy - 1.0).abs() < 1e-12, "energy = {energy}");
    }

    #[test]
    fn slice_length_checked() {
        assert!(forward_slice(&ramp_block()).is_ok());
        match forward_slice(&[0.0; 63]) {
            Err(StegoError::SizeMismatch { expected: 64, actual: 63 }) => {}
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
        assert!(matches!(
            inverse_slice(&[0.0; 65]),
            Err(StegoError::SizeMismatch { expected: 64, actual: 65 })
        ));
    }
}
