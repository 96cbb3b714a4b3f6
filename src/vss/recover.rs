// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Share reconstruction: solving the Vandermonde system over GF(257).
//!
//! Any k shadows determine each group's polynomial exactly. For one group,
//! the k (point, value) pairs form the linear system `A · coef = y (mod 257)`
//! with `A[row][col] = x[row]^col` — a Vandermonde matrix, nonsingular
//! whenever the points are distinct. Gauss–Jordan elimination with modular
//! pivot inverses recovers the full coefficient vector, which IS the group's
//! k whitened-secret bytes. Groups are independent and may be solved
//! concurrently (`parallel` feature).
//!
//! Shadow order does not matter, and any k of the n shadows give the same
//! answer; duplicate point identities are rejected up front.

use crate::vss::error::{Result, VssError};
use crate::vss::field;
use crate::vss::split::ShadowShares;

/// Solve `A · coef = values (mod 257)` for the Vandermonde matrix built from
/// `points`, returning the k coefficients.
///
/// # Errors
/// [`VssError::SingularSystem`] if no nonzero pivot can be found — with
/// distinct points this cannot happen, so in practice it signals duplicate
/// points that slipped past the caller.
pub fn solve_vandermonde(points: &[u16], values: &[u16]) -> Result<Vec<u16>> {
    let k = points.len();
    debug_assert_eq!(values.len(), k);

    // Augmented matrix [A | y], one row per shadow.
    let mut m: Vec<Vec<u16>> = points
        .iter()
        .zip(values)
        .map(|(&x, &y)| {
            let mut row: Vec<u16> = (0..k as u32).map(|c| field::pow(x, c)).collect();
            row.push(y % field::MODULUS);
            row
        })
        .collect();

    for col in 0..k {
        // Find a row with a nonzero pivot and swap it up.
        let pivot_row = (col..k)
            .find(|&r| m[r][col] != 0)
            .ok_or(VssError::SingularSystem)?;
        m.swap(col, pivot_row);

        // Normalize the pivot row.
        let inv = field::inverse(m[col][col])?;
        for entry in &mut m[col] {
            *entry = field::mul(*entry, inv);
        }

        // Eliminate the column from every other row.
        for row in 0..k {
            if row == col || m[row][col] == 0 {
                continue;
            }
            let factor = m[row][col];
            for c in col..=k {
                let sub = field::mul(factor, m[col][c]);
                m[row][c] = field::sub(m[row][c], sub);
            }
        }
    }

    Ok(m.into_iter().map(|row| row[k]).collect())
}

/// Undo the 255/256 collision for one shadow's share at `group`.
#[inline]
fn share_value(shadow: &ShadowShares, group: usize) -> u16 {
    if shadow.border[group] {
        256
    } else {
        u16::from(shadow.values[group])
    }
}

/// Reconstruct the whitened secret from at least k share streams.
///
/// Uses the first k streams in the order supplied; any k distinct shadows
/// yield the same secret, in any order. Returns `group_count * k` bytes.
///
/// # Errors
/// - [`VssError::InsufficientShadows`] with fewer than k streams.
/// - [`VssError::SingularSystem`] if two streams share a point identity.
/// - [`VssError::InvalidParameters`] if the streams disagree on group count.
pub fn reconstruct(shadows: &[ShadowShares], k: usize) -> Result<Vec<u8>> {
    if shadows.len() < k {
        return Err(VssError::InsufficientShadows { have: shadows.len(), need: k });
    }
    let shadows = &shadows[..k];

    for (i, a) in shadows.iter().enumerate() {
        if a.values.len() != shadows[0].values.len() || a.values.len() != a.border.len() {
            return Err(VssError::InvalidParameters("share streams differ in length"));
        }
        if shadows[i + 1..].iter().any(|b| b.point == a.point) {
            return Err(VssError::SingularSystem);
        }
    }

    let points: Vec<u16> = shadows.iter().map(|s| s.point).collect();
    let group_count = shadows[0].values.len();

    let groups = solve_groups(shadows, &points, group_count)?;

    let mut whitened = Vec::with_capacity(group_count * k);
    for coeffs in groups {
        // Coefficients are whitened bytes, so they are < 256 for well-formed
        // shares; the cast mirrors the byte-wise storage.
        whitened.extend(coeffs.into_iter().map(|c| c as u8));
    }
    Ok(whitened)
}

#[cfg(not(feature = "parallel"))]
fn solve_groups(
    shadows: &[ShadowShares],
    points: &[u16],
    group_count: usize,
) -> Result<Vec<Vec<u16>>> {
    (0..group_count)
        .map(|g| {
            let values: Vec<u16> = shadows.iter().map(|s| share_value(s, g)).collect();
            solve_vandermonde(points, &values)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn solve_groups(
    shadows: &[ShadowShares],
    points: &[u16],
    group_count: usize,
) -> Result<Vec<Vec<u16>>> {
    use rayon::prelude::*;
    (0..group_count)
        .into_par_iter()
        .map(|g| {
            let values: Vec<u16> = shadows.iter().map(|s| share_value(s, g)).collect();
            solve_vandermonde(points, &values)
        })
        .collect()
}
