// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Message framing: bytes ↔ bitstream.
//!
//! ```text
//! [N bytes] message, each byte MSB first
//! [1 byte ] terminator 0x00
//! ```
//!
//! The terminator is always appended, even when the message already ends in
//! a zero byte. A message containing an interior zero byte therefore decodes
//! only up to that byte unless an explicit bit length is given.
//!
//! Decoding goes through [`unframe`], built on the incremental [`Unframer`].
//! [`bytes_to_bits`] and [`bits_to_bytes`] are the plain MSB-first
//! conversions without the terminator.

use super::error::StegoError;

/// Bits per framed byte.
const BYTE_BITS: usize = 8;

/// The terminator value.
pub const TERMINATOR: u8 = 0x00;

/// Number of bits `frame` produces for a message of `message_len` bytes.
pub fn framed_bit_len(message_len: usize) -> usize {
    (message_len + 1) * BYTE_BITS
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * BYTE_BITS);
    for &byte in bytes {
        for bit_pos in (0..BYTE_BITS).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// A trailing partial byte is discarded.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(BYTE_BITS)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect()
}

/// Expand a message into its framed bitstream.
pub fn frame(message: &[u8]) -> Vec<u8> {
    let mut bits = bytes_to_bits(message);
    bits.extend(std::iter::repeat(0u8).take(BYTE_BITS));
    debug_assert_eq!(bits.len(), framed_bit_len(message.len()));
    bits
}

/// Framer state between bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerState {
    /// Collecting bits of the next byte; `bit_count` is 0..=7.
    Accumulating { byte: u8, bit_count: u8 },
    /// The last bit completed `byte`.
    ByteComplete(u8),
}

/// What a single pushed bit produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// The current byte is still incomplete.
    NeedMore,
    /// A non-terminator byte was completed (or any byte, in raw mode).
    Byte(u8),
    /// A terminator byte was completed; no more bits should be pushed.
    Terminated,
}

/// Incremental bitstream decoder.
///
/// In terminated mode (the default) a completed zero byte ends the stream
/// and is not part of the message. In raw mode every completed byte is
/// kept; this is used when the caller supplies an explicit bit length.
#[derive(Debug, Clone)]
pub struct Unframer {
    state: FramerState,
    bytes: Vec<u8>,
    bits_read: usize,
    honor_terminator: bool,
    terminated: bool,
}

impl Default for Unframer {
    fn default() -> Self {
        Self::new()
    }
}

impl Unframer {
    /// Decoder that stops at the first zero byte.
    pub fn new() -> Self {
        Self {
            state: FramerState::Accumulating { byte: 0, bit_count: 0 },
            bytes: Vec::new(),
            bits_read: 0,
            honor_terminator: true,
            terminated: false,
        }
    }

    /// Decoder that keeps every complete byte, zero bytes included.
    pub fn raw() -> Self {
        Self {
            honor_terminator: false,
            ..Self::new()
        }
    }

    pub fn state(&self) -> FramerState {
        self.state
    }

    pub fn bits_read(&self) -> usize {
        self.bits_read
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Bytes assembled so far (never includes the terminator).
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume one bit. Only the lowest bit of `bit` is used.
    pub fn push(&mut self, bit: u8) -> FrameEvent {
        if self.terminated {
            return FrameEvent::Terminated;
        }
        self.bits_read += 1;

        let (byte, bit_count) = match self.state {
            FramerState::Accumulating { byte, bit_count } => (byte, bit_count),
            FramerState::ByteComplete(_) => (0, 0),
        };
        let byte = (byte << 1) | (bit & 1);
        let bit_count = bit_count + 1;

        if (bit_count as usize) < BYTE_BITS {
            self.state = FramerState::Accumulating { byte, bit_count };
            return FrameEvent::NeedMore;
        }

        self.state = FramerState::ByteComplete(byte);
        if self.honor_terminator && byte == TERMINATOR {
            self.terminated = true;
            FrameEvent::Terminated
        } else {
            self.bytes.push(byte);
            FrameEvent::Byte(byte)
        }
    }

    /// Finish decoding and return the message bytes.
    ///
    /// # Errors
    /// [`StegoError::TerminatorNotFound`] in terminated mode if no zero byte
    /// was seen. Raw mode always succeeds; a partial final byte is dropped.
    pub fn finish(self) -> Result<Vec<u8>, StegoError> {
        if self.honor_terminator && !self.terminated {
            return Err(StegoError::TerminatorNotFound { bits_read: self.bits_read });
        }
        Ok(self.bytes)
    }
}

/// Decode a bitstream back into message bytes.
///
/// - `expected_bits = Some(n)`: read exactly `n` bits (fewer if the stream
///   ends first), ignore the terminator and return every complete byte.
/// - `expected_bits = None`: read until a zero byte and return the bytes
///   before it.
///
/// # Errors
/// [`StegoError::TerminatorNotFound`] if `expected_bits` is `None` and the
/// stream ends before a terminator byte.
pub fn unframe<I>(bits: I, expected_bits: Option<usize>) -> Result<Vec<u8>, StegoError>
where
    I: IntoIterator<Item = u8>,
{
    match expected_bits {
        Some(n) => {
            let mut framer = Unframer::raw();
            for bit in bits.into_iter().take(n) {
                framer.push(bit);
            }
            framer.finish()
        }
        None => {
            let mut framer = Unframer::new();
            for bit in bits {
                if framer.push(bit) == FrameEvent::Terminated {
                    break;
                }
            }
            framer.finish()
        }
    }
}
