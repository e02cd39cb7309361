// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! # dctsteg-core
//!
//! Hides a byte message in a grayscale image by forcing the sign of one
//! mid-frequency DCT coefficient in each 8×8 block, and recovers it again.
//!
//! - **Encode**: message → MSB-first bitstream + zero terminator byte →
//!   one bit per block (row-major) → forward DCT, sign the carrier at
//!   (4, 5) with magnitude `|c| + strength`, inverse DCT.
//! - **Decode**: the same block order → forward DCT → carrier sign → bytes
//!   until the terminator (or an explicit bit length).
//!
//! The codec works on `f64` samples. Rounding to 8 bits happens only when an
//! image is saved, and is the main threat to small strengths; a strength
//! above 4 bounds the carrier error from rounding alone below the margin.
//!
//! # Quick start
//!
//! ```rust
//! use dctsteg_core::{decode, encode, LumaImage, StegoConfig};
//!
//! let cover = LumaImage::filled(64, 64, 128.0);
//! let config = StegoConfig::default();
//! let stego = encode(&cover, b"hi", &config).unwrap();
//! assert_eq!(decode(&stego, &config, None).unwrap(), b"hi");
//! ```

pub mod raster;
pub mod stego;

pub use raster::error::RasterError;
pub use raster::io::{load_luma, save_luma, to_grayscale, SaveStats};
pub use raster::LumaImage;
pub use stego::{capacity, CapacityInfo, DecodeReport, StegoConfig, StegoError, Strength, DEFAULT_STRENGTH};
pub use stego::{decode, decode_message, decode_with_report, encode, encode_message};
