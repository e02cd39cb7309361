// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Capacity of a cover image.
//!
//! Every full 8×8 block carries exactly one bit, so the bit capacity is the
//! block count. One byte of that goes to the terminator.
//!
//! [`check_fits`] is what `encode` runs; [`message_fits`] is the same test
//! for callers that want to size a message before encoding.

use crate::raster::LumaImage;

use super::error::StegoError;
use super::frame::framed_bit_len;

/// Capacity summary for a cover image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInfo {
    pub blocks_wide: usize,
    pub blocks_tall: usize,
    /// Embeddable bits, one per full block.
    pub bits: usize,
    /// Longest message (in bytes) whose framed stream fits.
    pub max_message_bytes: usize,
}

/// Longest message (in bytes) that fits in `available_bits` after framing.
pub fn max_message_bytes(available_bits: usize) -> usize {
    (available_bits / 8).saturating_sub(1)
}

/// Capacity of `img`.
pub fn capacity(img: &LumaImage) -> CapacityInfo {
    let layout = img.layout();
    let bits = layout.total_blocks();
    CapacityInfo {
        blocks_wide: layout.blocks_wide(),
        blocks_tall: layout.blocks_tall(),
        bits,
        max_message_bytes: max_message_bytes(bits),
    }
}

/// Check that a framed stream of `needed_bits` fits in `img`.
///
/// # Errors
/// [`StegoError::InsufficientCapacity`] with both counts if it does not.
pub fn check_fits(img: &LumaImage, needed_bits: usize) -> Result<(), StegoError> {
    let available_bits = img.layout().total_blocks();
    if needed_bits > available_bits {
        return Err(StegoError::InsufficientCapacity { needed_bits, available_bits });
    }
    Ok(())
}

/// Whether a message of `message_len` bytes fits in `img`.
pub fn message_fits(img: &LumaImage, message_len: usize) -> bool {
    check_fits(img, framed_bit_len(message_len)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_64x64() {
        let img = LumaImage::filled(64, 64, 128.0);
        let cap = capacity(&img);
        assert_eq!(cap.bits, 64);
        assert_eq!((cap.blocks_wide, cap.blocks_tall), (8, 8));
        assert_eq!(cap.max_message_bytes, 7);
        assert!(message_fits(&img, 7));
        assert!(!message_fits(&img, 8));
    }

    #[test]
    fn tiny_image_has_no_capacity() {
        let img = LumaImage::filled(7, 7, 0.0);
        let cap = capacity(&img);
        assert_eq!(cap.bits, 0);
        assert_eq!(cap.max_message_bytes, 0);
        assert!(!message_fits(&img, 0));
    }

    #[test]
    fn check_fits_reports_counts() {
        let img = LumaImage::filled(64, 64, 0.0);
        assert!(check_fits(&img, 64).is_ok());
        assert_eq!(
            check_fits(&img, 65),
            Err(StegoError::InsufficientCapacity { needed_bits: 65, available_bits: 64 })
        );
    }
}
