// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Codec configuration.
//!
//! The embedding strength is the only tunable: it sets how far the carrier
//! coefficient is pushed past zero, trading robustness for visibility.
//! Block size and carrier position are fixed so that any encoder and
//! decoder agree on them.

use super::error::StegoError;

/// Default embedding strength.
pub const DEFAULT_STRENGTH: f64 = 0.1;

/// Carrier coefficient row within the 8×8 coefficient block.
pub const CARRIER_ROW: usize = 4;

/// Carrier coefficient column within the 8×8 coefficient block.
pub const CARRIER_COL: usize = 5;

/// Natural (row-major) index of the carrier coefficient.
pub const CARRIER_INDEX: usize = CARRIER_ROW * crate::raster::dct::BLOCK_SIZE + CARRIER_COL;

/// Validated embedding strength (alpha > 0, finite).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Strength(f64);

impl Strength {
    /// # Errors
    /// [`StegoError::InvalidStrength`] for zero, negative, NaN or infinite values.
    pub fn new(alpha: f64) -> Result<Self, StegoError> {
        if alpha.is_finite() && alpha > 0.0 {
            Ok(Self(alpha))
        } else {
            Err(StegoError::InvalidStrength(alpha))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self(DEFAULT_STRENGTH)
    }
}

impl TryFrom<f64> for Strength {
    type Error = StegoError;

    fn try_from(alpha: f64) -> Result<Self, StegoError> {
        Self::new(alpha)
    }
}

/// Settings threaded through every encode and decode call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StegoConfig {
    /// Controls embedding magnitude and the robustness/visibility trade-off.
    pub strength: Strength,
}

impl StegoConfig {
    /// # Errors
    /// [`StegoError::InvalidStrength`] if `alpha` is not positive and finite.
    pub fn with_strength(alpha: f64) -> Result<Self, StegoError> {
        Ok(Self { strength: Strength::new(alpha)? })
    }
}
