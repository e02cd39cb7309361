// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Sign-keyed embedding and extraction on the carrier coefficient.
//!
//! One bit per block is carried by the sign of the coefficient at
//! [`CARRIER_INDEX`]:
//!
//! - embed 1: carrier := `|c| + alpha`
//! - embed 0: carrier := `-(|c| + alpha)`
//! - extract: carrier `> 0` → 1, anything else (0.0, -0.0, NaN) → 0
//!
//! Embedding leaves `|carrier| >= alpha > 0` with the bit's sign, so the
//! extract predicate holds whatever the carrier was before. Both directions
//! go through [`PolarityRule`] so they cannot drift apart.

use crate::raster::dct::Block;

use super::config::{Strength, CARRIER_INDEX};

/// The shared embed/extract predicate pair for one strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityRule {
    alpha: f64,
}

impl PolarityRule {
    pub fn new(strength: Strength) -> Self {
        Self { alpha: strength.get() }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Carrier value that encodes `bit`, starting from `current`.
    pub fn carrier_for(&self, current: f64, bit: u8) -> f64 {
        debug_assert!(bit <= 1);
        let magnitude = current.abs() + self.alpha;
        if bit == 1 {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Bit carried by a carrier value.
    pub fn bit_for(carrier: f64) -> u8 {
        u8::from(carrier > 0.0)
    }

    /// Return `coeffs` with the carrier set to encode `bit`. Every other
    /// coefficient is unchanged.
    pub fn embed(&self, coeffs: &Block, bit: u8) -> Block {
        let mut out = *coeffs;
        out[CARRIER_INDEX] = self.carrier_for(coeffs[CARRIER_INDEX], bit);
        out
    }

    /// Read the bit carried by a coefficient block. Never fails.
    pub fn extract(coeffs: &Block) -> u8 {
        Self::bit_for(coeffs[CARRIER_INDEX])
    }

    /// Distance of the carrier beyond the embedding threshold (`|c| - alpha`).
    ///
    /// Freshly embedded carriers have a margin `>= 0`; a negative margin
    /// means the block was disturbed after embedding. Diagnostic only.
    pub fn margin(&self, coeffs: &Block) -> f64 {
        coeffs[CARRIER_INDEX].abs() - self.alpha
    }
}
