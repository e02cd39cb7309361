// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Encode/decode pipeline.
//!
//! Encode: frame the message, check capacity, then for bit `k` take block
//! `k` of the row-major block order through forward DCT → carrier embed →
//! inverse DCT and write it back in place.
//!
//! Decode: walk the same block order through forward DCT → carrier extract
//! and feed the bits to [`frame::unframe`] until it terminates or the
//! requested bit length is reached.
//!
//! With the `parallel` feature, per-block work runs on rayon and results are
//! reassembled by block index, so the output is identical to the serial path.

use log::{debug, info, warn};

use crate::raster::blocks::{BlockCoord, BlockLayout};
use crate::raster::dct::{self, Block};
use crate::raster::LumaImage;

use super::capacity;
use super::config::StegoConfig;
use super::error::StegoError;
use super::frame;
use super::polarity::PolarityRule;

/// Slack below zero margin still counted as healthy (transform round-off).
const MARGIN_TOLERANCE: f64 = 1e-9;

/// Carrier health observed while decoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeReport {
    /// Number of blocks read.
    pub bits_read: usize,
    /// Blocks whose carrier magnitude fell below the configured strength.
    pub weak_carriers: usize,
    /// Smallest `|carrier| - strength` seen, or `None` if nothing was read.
    pub min_margin: Option<f64>,
    /// Whether a terminator byte ended the decode.
    pub terminated: bool,
}

/// Hide `message` in a copy of `cover`.
///
/// Remainder pixels outside the full-block grid and blocks past the end of
/// the framed stream are left untouched.
///
/// # Errors
/// [`StegoError::InsufficientCapacity`] if the framed message has more bits
/// than `cover` has full blocks. Nothing is written in that case.
pub fn encode(cover: &LumaImage, message: &[u8], config: &StegoConfig) -> Result<LumaImage, StegoError> {
    let bits = frame::frame(message);
    capacity::check_fits(cover, bits.len())?;

    let rule = PolarityRule::new(config.strength);
    let layout = cover.layout();
    debug!(
        "encode: {} message bytes -> {} bits, {}x{} blocks, strength {}",
        message.len(),
        bits.len(),
        layout.blocks_wide(),
        layout.blocks_tall(),
        rule.alpha()
    );

    let mut stego = cover.clone();
    embed_blocks(cover, &mut stego, &layout, &bits, &rule);

    info!("embedded {} of {} available bits", bits.len(), layout.total_blocks());
    Ok(stego)
}

/// [`encode`] for text messages.
pub fn encode_message(cover: &LumaImage, message: &str, config: &StegoConfig) -> Result<LumaImage, StegoError> {
    encode(cover, message.as_bytes(), config)
}

/// Recover the message bytes hidden in `img`.
///
/// With `expected_bits`, exactly that many bits are read (fewer if the image
/// runs out of blocks) and every complete byte is returned, zero bytes
/// included. Without it, bytes are read up to the first zero byte.
///
/// # Errors
/// [`StegoError::TerminatorNotFound`] if `expected_bits` is `None` and no
/// block-aligned zero byte appears before the blocks run out.
pub fn decode(img: &LumaImage, config: &StegoConfig, expected_bits: Option<usize>) -> Result<Vec<u8>, StegoError> {
    decode_with_report(img, config, expected_bits).map(|(message, _)| message)
}

/// [`decode`] for text messages.
///
/// # Errors
/// As [`decode`], plus [`StegoError::InvalidUtf8`].
pub fn decode_message(img: &LumaImage, config: &StegoConfig, expected_bits: Option<usize>) -> Result<String, StegoError> {
    let bytes = decode(img, config, expected_bits)?;
    String::from_utf8(bytes).map_err(|_| StegoError::InvalidUtf8)
}

/// [`decode`] that also reports carrier health.
pub fn decode_with_report(
    img: &LumaImage,
    config: &StegoConfig,
    expected_bits: Option<usize>,
) -> Result<(Vec<u8>, DecodeReport), StegoError> {
    let rule = PolarityRule::new(config.strength);
    let layout = img.layout();
    let limit = expected_bits.unwrap_or(usize::MAX);
    debug!(
        "decode: {} blocks available, limit {:?}, strength {}",
        layout.total_blocks(),
        expected_bits,
        rule.alpha()
    );

    let mut report = DecodeReport {
        bits_read: 0,
        weak_carriers: 0,
        min_margin: None,
        terminated: false,
    };

    let bits = read_carriers(img, &layout, limit, &rule).map(|reading| {
        report.bits_read += 1;
        if reading.margin < -MARGIN_TOLERANCE {
            report.weak_carriers += 1;
        }
        report.min_margin = Some(report.min_margin.map_or(reading.margin, |m| m.min(reading.margin)));
        reading.bit
    });
    let unframed = frame::unframe(bits, expected_bits);
    // Unbounded decode only succeeds on a terminator.
    report.terminated = expected_bits.is_none() && unframed.is_ok();

    if let Some(n) = expected_bits {
        if report.bits_read < n {
            warn!("requested {n} bits but the image only holds {}", report.bits_read);
        }
    }
    if report.weak_carriers > 0 {
        warn!(
            "{} of {} carriers are weaker than strength {}; the image may have been altered or decoded with the wrong strength",
            report.weak_carriers,
            report.bits_read,
            rule.alpha()
        );
    }

    let message = unframed?;
    info!("recovered {} bytes from {} bits", message.len(), report.bits_read);
    Ok((message, report))
}

/// Bit and margin read from one block.
#[derive(Debug, Clone, Copy)]
struct CarrierReading {
    bit: u8,
    margin: f64,
}

fn embed_block(cover: &LumaImage, coord: BlockCoord, bit: u8, rule: &PolarityRule) -> Block {
    let coeffs = dct::forward(&cover.read_block(coord));
    dct::inverse(&rule.embed(&coeffs, bit))
}

fn read_carrier(img: &LumaImage, coord: BlockCoord, rule: &PolarityRule) -> CarrierReading {
    let coeffs = dct::forward(&img.read_block(coord));
    CarrierReading {
        bit: PolarityRule::extract(&coeffs),
        margin: rule.margin(&coeffs),
    }
}

#[cfg(not(feature = "parallel"))]
fn embed_blocks(cover: &LumaImage, stego: &mut LumaImage, layout: &BlockLayout, bits: &[u8], rule: &PolarityRule) {
    for (coord, &bit) in layout.iter().zip(bits) {
        let block = embed_block(cover, coord, bit, rule);
        stego.write_block(coord, &block);
    }
}

/// Parallel map over block index, then ordered write-back.
#[cfg(feature = "parallel")]
fn embed_blocks(cover: &LumaImage, stego: &mut LumaImage, layout: &BlockLayout, bits: &[u8], rule: &PolarityRule) {
    use rayon::prelude::*;

    let coords: Vec<BlockCoord> = layout.iter().take(bits.len()).collect();
    let blocks: Vec<Block> = coords
        .par_iter()
        .zip(bits.par_iter())
        .map(|(&coord, &bit)| embed_block(cover, coord, bit, rule))
        .collect();

    for (coord, block) in coords.iter().zip(&blocks) {
        stego.write_block(*coord, block);
    }
}

/// Serial path reads lazily, so decode stops at the terminator block.
#[cfg(not(feature = "parallel"))]
fn read_carriers<'a>(
    img: &'a LumaImage,
    layout: &BlockLayout,
    limit: usize,
    rule: &'a PolarityRule,
) -> impl Iterator<Item = CarrierReading> + 'a {
    layout.iter().take(limit).map(move |coord| read_carrier(img, coord, rule))
}

/// Parallel path reads every block up to `limit` up front.
#[cfg(feature = "parallel")]
fn read_carriers<'a>(
    img: &'a LumaImage,
    layout: &BlockLayout,
    limit: usize,
    rule: &'a PolarityRule,
) -> impl Iterator<Item = CarrierReading> + 'a {
    use rayon::prelude::*;

    let coords: Vec<BlockCoord> = layout.iter().take(limit).collect();
    let readings: Vec<CarrierReading> = coords
        .par_iter()
        .map(|&coord| read_carrier(img, coord, rule))
        .collect();
    readings.into_iter()
}
