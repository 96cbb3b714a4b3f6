// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Error types for BMP parsing and writing.

use std::fmt;

/// Errors that can occur while parsing or editing a BMP file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BmpError {
    /// Input data is too short to hold the declared header.
    UnexpectedEof,
    /// Missing "BM" signature at the start of the file.
    InvalidSignature,
    /// The pixel-array offset points outside the file.
    InvalidPixelOffset,
    /// The image is not 8 bits per pixel (single channel).
    NotEightBit(u16),
    /// A reserved-field access lies outside the header, or the field width
    /// is not 1–4 bytes.
    InvalidReservedField,
    /// Crop target is larger than the source image.
    InvalidCropSize,
}

impl fmt::Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of BMP data"),
            Self::InvalidSignature => write!(f, "missing BM signature (not a BMP)"),
            Self::InvalidPixelOffset => write!(f, "pixel-array offset outside the file"),
            Self::NotEightBit(bpp) => write!(f, "unsupported bit depth: {bpp} bpp (need 8)"),
            Self::InvalidReservedField => write!(f, "reserved-field access outside the header"),
            Self::InvalidCropSize => write!(f, "crop target exceeds source dimensions"),
        }
    }
}

impl std::error::Error for BmpError {}

pub type Result<T> = std::result::Result<T, BmpError>;
