// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Error types for the secret-sharing pipeline.
//!
//! [`VssError`] covers all failure modes from BMP parsing through share
//! generation and reconstruction.

use core::fmt;

/// Errors that can occur while splitting a secret or recombining shadows.
#[derive(Debug)]
pub enum VssError {
    /// Scheme parameters out of range (k, n bounds) or the secret length is
    /// not divisible by k. Raised before any work begins.
    InvalidParameters(&'static str),
    /// A carrier is too small for its shadow even after escalating through
    /// all eight bit planes. Carries the 0-based shadow index.
    CapacityExceeded { shadow: usize },
    /// Fewer than k shadows were supplied to a reconstruction attempt.
    InsufficientShadows { have: usize, need: usize },
    /// Two supplied shadows report the same point identity, making the
    /// Vandermonde system singular.
    SingularSystem,
    /// Modular inverse requested for 0, which has none in GF(257).
    NoInverse,
    /// A carrier or secret could not be parsed as an 8-bit BMP.
    UnsupportedFormat(crate::bmp::error::BmpError),
    /// The operation was cancelled by the user.
    Cancelled,
}

impl fmt::Display for VssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters(msg) => write!(f, "invalid parameters: {msg}"),
            Self::CapacityExceeded { shadow } => {
                write!(f, "carrier for shadow {shadow} too small, even using all bit planes")
            }
            Self::InsufficientShadows { have, need } => {
                write!(f, "need at least {need} shadows to reconstruct, got {have}")
            }
            Self::SingularSystem => write!(f, "duplicate point identity: system is singular"),
            Self::NoInverse => write!(f, "0 has no inverse modulo 257"),
            Self::UnsupportedFormat(e) => write!(f, "unsupported carrier format: {e}"),
            Self::Cancelled => write!(f, "operation cancelled by user"),
        }
    }
}

impl std::error::Error for VssError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedFormat(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::bmp::error::BmpError> for VssError {
    fn from(e: crate::bmp::error::BmpError) -> Self {
        Self::UnsupportedFormat(e)
    }
}

pub type Result<T> = std::result::Result<T, VssError>;
