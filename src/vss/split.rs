// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Share generation: polynomial evaluation over GF(257).
//!
//! The whitened secret is cut into groups of k consecutive bytes; each group
//! is read as the coefficients a0..a(k-1) of one polynomial. Shadow x
//! (point identity 1..=n) receives one share per group: `y = P(x) mod 257`.
//!
//! An evaluation can land on 256, which no carrier byte can hold. The share
//! is then stored as 255 with its border flag set — the flag travels with
//! the share through the codec and the reconstructor undoes the collision.
//! The same group may hit 256 for one point identity and not another, so the
//! flag belongs to the (group, shadow) pair, never to the group alone.

use crate::vss::bitplane;
use crate::vss::error::{Result, VssError};
use crate::vss::field;
use crate::vss::validate_params;

/// One shadow's full share stream: its point identity, one byte per
/// coefficient group, and the parallel border flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowShares {
    /// The x-coordinate (1..=n) this shadow evaluates at.
    pub point: u16,
    /// Per-group share bytes (256 stored as 255, see `border`).
    pub values: Vec<u8>,
    /// Per-group flags; true means the true field value is 256.
    pub border: Vec<bool>,
}

/// Evaluate `Σ coeffs[i] · x^i mod 257`.
fn eval_group(coeffs: &[u8], x: u16) -> u16 {
    let mut y = 0u16;
    for (i, &c) in coeffs.iter().enumerate() {
        y = field::add(y, field::mul(u16::from(c), field::pow(x, i as u32)));
    }
    y
}

/// Produce the share stream for one point identity.
fn shares_for_point(whitened: &[u8], k: usize, x: u16) -> ShadowShares {
    let group_count = whitened.len() / k;
    let mut values = Vec::with_capacity(group_count);
    let mut border = Vec::with_capacity(group_count);
    for group in whitened.chunks_exact(k) {
        let y = eval_group(group, x);
        if y == 256 {
            values.push(255);
            border.push(true);
        } else {
            values.push(y as u8);
            border.push(false);
        }
    }
    ShadowShares { point: x, values, border }
}

/// Generate the n share streams for a whitened secret.
///
/// Shadows are independent of one another; with the `parallel` feature they
/// are computed concurrently.
///
/// # Errors
/// [`VssError::InvalidParameters`] if k or n is out of range or the secret
/// length is not divisible by k. Checked before any work begins.
pub fn generate_shadows(whitened: &[u8], k: usize, n: usize) -> Result<Vec<ShadowShares>> {
    validate_params(k, n, whitened.len())?;
    Ok(all_points(whitened, k, n))
}

#[cfg(not(feature = "parallel"))]
fn all_points(whitened: &[u8], k: usize, n: usize) -> Vec<ShadowShares> {
    (1..=n as u16).map(|x| shares_for_point(whitened, k, x)).collect()
}

#[cfg(feature = "parallel")]
fn all_points(whitened: &[u8], k: usize, n: usize) -> Vec<ShadowShares> {
    use rayon::prelude::*;
    (1..=n as u16)
        .into_par_iter()
        .map(|x| shares_for_point(whitened, k, x))
        .collect()
}

/// Embed one shadow's share stream into its carrier buffer.
///
/// `shadow_idx` is the 0-based index used in the capacity error; the codec
/// itself does not know which shadow it is working for.
///
/// # Errors
/// [`VssError::CapacityExceeded`] when the stream does not fit the carrier
/// even after escalating through all eight bit planes.
pub fn embed_shadow(carrier: &[u8], shares: &ShadowShares, shadow_idx: usize) -> Result<Vec<u8>> {
    bitplane::embed(carrier, &shares.values, &shares.border)
        .ok_or(VssError::CapacityExceeded { shadow: shadow_idx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_known_values() {
        // P(x) = 10 + 20x + 30x² at x=1,2,3.
        assert_eq!(eval_group(&[10, 20, 30], 1), 60);
        assert_eq!(eval_group(&[10, 20, 30], 2), 170);
        assert_eq!(eval_group(&[10, 20, 30], 3), 83); // 340 mod 257
    }

    #[test]
    fn eval_reduces_mod_257() {
        // 254 + 1·2 = 256: a legal field element right at the byte boundary.
        assert_eq!(eval_group(&[254, 1], 2), 256);
        // 255 + 200·1 = 455 ≡ 198.
        assert_eq!(eval_group(&[255, 200], 1), 198);
    }

    #[test]
    fn border_case_flagged_per_shadow() {
        // [254, 1]: P(2) = 256 but P(1) = 255 — the flag must differ between
        // the two shadows for the same group.
        let shadows = generate_shadows(&[254, 1], 2, 2).unwrap();
        assert_eq!(shadows[0].point, 1);
        assert_eq!(shadows[0].values, [255]);
        assert_eq!(shadows[0].border, [false]);
        assert_eq!(shadows[1].point, 2);
        assert_eq!(shadows[1].values, [255]);
        assert_eq!(shadows[1].border, [true]);
    }

    #[test]
    fn shadow_count_and_group_count() {
        let whitened = vec![7u8; 12];
        let shadows = generate_shadows(&whitened, 3, 5).unwrap();
        assert_eq!(shadows.len(), 5);
        for (i, s) in shadows.iter().enumerate() {
            assert_eq!(s.point, i as u16 + 1);
            assert_eq!(s.values.len(), 4);
            assert_eq!(s.border.len(), 4);
        }
    }

    #[test]
    fn invalid_parameters_rejected() {
        let whitened = vec![0u8; 12];
        assert!(matches!(generate_shadows(&whitened, 1, 5), Err(VssError::InvalidParameters(_))));
        assert!(matches!(generate_shadows(&whitened, 11, 12), Err(VssError::InvalidParameters(_))));
        assert!(matches!(generate_shadows(&whitened, 4, 3), Err(VssError::InvalidParameters(_))));
        assert!(matches!(generate_shadows(&whitened, 2, 1), Err(VssError::InvalidParameters(_))));
        // 12 % 5 != 0
        assert!(matches!(generate_shadows(&whitened, 5, 6), Err(VssError::InvalidParameters(_))));
    }

    #[test]
    fn embed_capacity_error_carries_index() {
        let shares = ShadowShares {
            point: 3,
            values: vec![1, 2, 3, 4],
            border: vec![false; 4],
        };
        let tiny = [0u8; 2]; // 16 bits < 32 needed
        match embed_shadow(&tiny, &shares, 2) {
            Err(VssError::CapacityExceeded { shadow }) => assert_eq!(shadow, 2),
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn embed_then_extract_matches() {
        let whitened: Vec<u8> = (0..20).map(|i| (i * 13) as u8).collect();
        let shadows = generate_shadows(&whitened, 4, 5).unwrap();
        let carrier = vec![0xA5u8; 20];
        for (i, s) in shadows.iter().enumerate() {
            let stego = embed_shadow(&carrier, s, i).unwrap();
            let (values, border) = crate::vss::bitplane::extract(&stego, s.values.len()).unwrap();
            assert_eq!(values, s.values);
            assert_eq!(border, s.border);
        }
    }
}
