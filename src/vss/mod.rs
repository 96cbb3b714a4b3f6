// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! (k,n) visual secret sharing over 8-bit carriers.
//!
//! The secret's pixel bytes are whitened with a seeded keystream, cut into
//! groups of k coefficients, and evaluated as polynomials over GF(257) at the
//! point identities 1..=n. Each shadow carries one evaluation per group,
//! hidden in its carrier's bit planes by the [`bitplane`] codec. Any k
//! shadows solve the per-group Vandermonde systems and undo the whitening;
//! k−1 shadows determine nothing about the secret.
//!
//! [`split_secret`] and [`recombine_secret`] are the BMP-facing entry points;
//! the lower modules work on plain byte buffers and never touch I/O.

pub mod error;
pub mod field;
pub mod keystream;
pub mod bitplane;
pub mod split;
pub mod recover;
pub mod progress;
mod pipeline;

pub use error::VssError;
pub use pipeline::{recombine_secret, split_secret};
pub use recover::{reconstruct, solve_vandermonde};
pub use split::{embed_shadow, generate_shadows, ShadowShares};

/// Smallest allowed reconstruction threshold.
pub const MIN_K: usize = 2;

/// Largest allowed reconstruction threshold.
pub const MAX_K: usize = 10;

/// Smallest allowed shadow count.
pub const MIN_N: usize = 2;

/// Validate scheme parameters before any work begins.
///
/// Returns `Ok(())` when k and n are within bounds and the secret length
/// divides evenly into k-byte coefficient groups. The length requirement is
/// a precondition of the scheme, never repaired by padding.
///
/// # Errors
/// [`VssError::InvalidParameters`] naming the violated constraint.
pub fn validate_params(k: usize, n: usize, secret_len: usize) -> Result<(), VssError> {
    if k < MIN_K || k > MAX_K {
        return Err(VssError::InvalidParameters("k must be between 2 and 10"));
    }
    if n < MIN_N {
        return Err(VssError::InvalidParameters("n must be at least 2"));
    }
    if k > n {
        return Err(VssError::InvalidParameters("k must not exceed n"));
    }
    if secret_len % k != 0 {
        return Err(VssError::InvalidParameters("secret length not divisible by k"));
    }
    Ok(())
}

#[cfg(test)]
mod param_tests {
    use super::*;

    #[test]
    fn valid_params() {
        assert!(validate_params(2, 2, 10).is_ok());
        assert!(validate_params(3, 5, 12).is_ok());
        assert!(validate_params(10, 10, 100).is_ok());
    }

    #[test]
    fn k_bounds() {
        assert!(validate_params(1, 5, 10).is_err());
        assert!(validate_params(11, 20, 22).is_err());
        assert!(validate_params(2, 5, 10).is_ok());
        assert!(validate_params(10, 12, 20).is_ok());
    }

    #[test]
    fn n_bounds() {
        assert!(validate_params(2, 1, 10).is_err());
        assert!(validate_params(2, 2, 10).is_ok());
    }

    #[test]
    fn k_not_above_n() {
        assert!(validate_params(5, 4, 10).is_err());
        assert!(validate_params(5, 5, 10).is_ok());
    }

    #[test]
    fn divisibility() {
        assert!(validate_params(3, 5, 10).is_err());
        assert!(validate_params(3, 5, 9).is_ok());
        // Empty secrets divide evenly but carry nothing — still accepted here,
        // rejected later by the pipeline's BMP parsing.
        assert!(validate_params(3, 5, 0).is_ok());
    }

    #[test]
    fn error_variant() {
        match validate_params(1, 5, 10) {
            Err(VssError::InvalidParameters(msg)) => assert!(msg.contains('k')),
            other => panic!("expected InvalidParameters, got {other:?}"),
        }
    }
}
