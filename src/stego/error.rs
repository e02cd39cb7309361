// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers every failure mode from configuration through
//! capacity checks, bitstream termination and image I/O.

use core::fmt;

use crate::raster::error::RasterError;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum StegoError {
    /// The framed message needs more bits than the image has full blocks.
    InsufficientCapacity { needed_bits: usize, available_bits: usize },
    /// Every block was read without assembling a terminator byte.
    TerminatorNotFound { bits_read: usize },
    /// A buffer length disagrees with the block or image dimensions.
    SizeMismatch { expected: usize, actual: usize },
    /// Embedding strength is not a positive finite number.
    InvalidStrength(f64),
    /// The recovered bytes are not valid UTF-8.
    InvalidUtf8,
    /// Image could not be read or written.
    Raster(RasterError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCapacity { needed_bits, available_bits } => write!(
                f,
                "message needs {needed_bits} bits but the image only has {available_bits} blocks (max {} message bytes)",
                super::capacity::max_message_bytes(*available_bits)
            ),
            Self::TerminatorNotFound { bits_read } => {
                write!(f, "no terminator byte found after reading {bits_read} bits")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected} samples, got {actual}")
            }
            Self::InvalidStrength(s) => write!(f, "strength must be positive and finite, got {s}"),
            Self::InvalidUtf8 => write!(f, "extracted message is not valid UTF-8"),
            Self::Raster(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Raster(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RasterError> for StegoError {
    fn from(e: RasterError) -> Self {
        Self::Raster(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_names_both_sides() {
        let e = StegoError::InsufficientCapacity { needed_bits: 520, available_bits: 64 };
        let msg = e.to_string();
        assert!(msg.contains("520"), "{msg}");
        assert!(msg.contains("64"), "{msg}");
        assert!(msg.contains("max 7 message bytes"), "{msg}");
    }

    #[test]
    fn raster_error_is_source() {
        use std::error::Error;
        let e: StegoError = RasterError::Unreadable {
            path: "x.png".into(),
            reason: "missing".into(),
        }
        .into();
        assert!(e.source().is_some());
        assert!(StegoError::InvalidUtf8.source().is_none());
    }
}
