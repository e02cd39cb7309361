// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Steganographic encoding and decoding.
//!
//! One message bit is hidden per full 8×8 block by forcing the sign of a
//! single mid-frequency DCT coefficient (see [`polarity`]). The message is
//! framed as MSB-first bytes followed by a zero terminator byte
//! (see [`frame`]), and bit `k` always lives in block `k` of the row-major
//! block order.

pub mod capacity;
pub mod config;
pub mod error;
pub mod frame;
pub mod polarity;
mod pipeline;

pub use capacity::{capacity, CapacityInfo};
pub use config::{Strength, StegoConfig, DEFAULT_STRENGTH};
pub use error::StegoError;
pub use pipeline::{decode, decode_message, decode_with_report, encode, encode_message, DecodeReport};
