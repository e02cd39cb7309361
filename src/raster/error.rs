// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for image loading and saving.

use std::fmt;
use std::path::PathBuf;

/// Errors raised by the image I/O layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The file could not be opened or decoded as an image.
    Unreadable { path: PathBuf, reason: String },
    /// The output file could not be encoded or written.
    Unwritable { path: PathBuf, reason: String },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, reason } => {
                write!(f, "unreadable image {}: {reason}", path.display())
            }
            Self::Unwritable { path, reason } => {
                write!(f, "cannot write output {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for RasterError {}

pub type Result<T> = std::result::Result<T, RasterError>;
