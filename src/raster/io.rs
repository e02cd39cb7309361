// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Image file loading and saving.
//!
//! Files are decoded with the `image` crate and reduced to 8-bit luma.
//! On save, samples are rounded and clamped to `0..=255`; clamping can
//! erase a carrier, so the number of clipped samples is reported back.

use std::path::Path;

use log::{debug, warn};

use super::error::{RasterError, Result};
use super::LumaImage;

/// Outcome of writing a [`LumaImage`] to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveStats {
    /// Samples that fell outside `0..=255` before clamping.
    pub clipped: usize,
}

/// Load any supported image file as grayscale samples.
///
/// Color files are reduced with the `image` crate's luma conversion, which
/// weighs channels with Rec. 709 coefficients (0.2126, 0.7152, 0.0722), not
/// the BT.601 weights (0.299, 0.587, 0.114) many other tools use. The same
/// color file can therefore load with slightly different samples here.
///
/// # Errors
/// [`RasterError::Unreadable`] if the file cannot be opened or decoded.
pub fn load_luma(path: impl AsRef<Path>) -> Result<LumaImage> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| RasterError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let luma = decoded.to_luma8();
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    debug!("loaded {} ({width}x{height})", path.display());

    LumaImage::from_u8(width, height, luma.as_raw()).map_err(|e| RasterError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Quantize samples to 8 bits, returning the pixels and the clip count.
pub fn quantize(img: &LumaImage) -> (Vec<u8>, usize) {
    let mut clipped = 0usize;
    let pixels = img
        .samples()
        .iter()
        .map(|&s| {
            let r = s.round();
            if !(0.0..=255.0).contains(&r) {
                clipped += 1;
            }
            r.clamp(0.0, 255.0) as u8
        })
        .collect();
    (pixels, clipped)
}

/// Save samples as an 8-bit grayscale image. The format follows the file
/// extension.
///
/// # Errors
/// [`RasterError::Unwritable`] if encoding or writing fails.
pub fn save_luma(img: &LumaImage, path: impl AsRef<Path>) -> Result<SaveStats> {
    let path = path.as_ref();
    let unwritable = |reason: String| RasterError::Unwritable {
        path: path.to_path_buf(),
        reason,
    };

    let (pixels, clipped) = quantize(img);
    if clipped > 0 {
        warn!(
            "{clipped} samples clipped to 0..=255 while saving {}; embedded bits in those blocks may not survive",
            path.display()
        );
    }

    let width = u32::try_from(img.width()).map_err(|e| unwritable(e.to_string()))?;
    let height = u32::try_from(img.height()).map_err(|e| unwritable(e.to_string()))?;
    let buffer = image::GrayImage::from_raw(width, height, pixels)
        .ok_or_else(|| unwritable("sample buffer does not match dimensions".to_string()))?;
    buffer.save(path).map_err(|e| unwritable(e.to_string()))?;
    debug!("saved {} ({}x{})", path.display(), img.width(), img.height());

    Ok(SaveStats { clipped })
}

/// Re-encode any image file as 8-bit grayscale, with the luma weights
/// described on [`load_luma`].
///
/// # Errors
/// [`RasterError::Unreadable`] / [`RasterError::Unwritable`] from the two ends.
pub fn to_grayscale(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<LumaImage> {
    let img = load_luma(input)?;
    save_luma(&img, output)?;
    Ok(img)
}
