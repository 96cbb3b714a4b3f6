// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Split/recombine pipelines over BMP carriers.
//!
//! The split pipeline whitens the secret's pixel bytes, generates the n
//! share streams, and hides each one in a carrier image. Shadows inherit the
//! secret's header (so every shadow has the secret's dimensions); carriers
//! larger than the secret are center-cropped first, and a carrier that
//! cannot hold its stream even across all bit planes fails with its shadow
//! index. The scheme metadata rides in unused header bytes of each shadow.
//!
//! The recombine pipeline is the mirror image: read metadata, extract the k
//! share streams, solve, un-whiten, and reassemble the secret BMP from the
//! first shadow's header.
//!
//! The core never lists directories — callers pass explicit, ordered carrier
//! and shadow byte buffers, and the first n (or k) entries are used.

use rand::Rng;
use zeroize::Zeroizing;

use crate::bmp::BmpImage;
use crate::vss::error::{Result, VssError};
use crate::vss::keystream;
use crate::vss::progress;
use crate::vss::split::{embed_shadow, generate_shadows, ShadowShares};
use crate::vss::{recover, validate_params};

/// Header offset of the whitening seed (u16 LE, BMP reserved bytes).
pub const SEED_OFFSET: usize = 6;
/// Header offset of the point identity (u16 LE, BMP reserved bytes).
pub const POINT_OFFSET: usize = 8;
/// Header offset of the coefficient-group count (u24 LE, image-size field —
/// unused by 8-bit viewers and restored on recombine).
pub const GROUP_COUNT_OFFSET: usize = 34;

/// Header offset of the image-size field restored on recombine (u32 LE).
const IMAGE_SIZE_OFFSET: usize = 34;

/// Split a secret BMP into n shadow BMPs.
///
/// `carrier_bmps` is an ordered list of at least n candidate carriers; the
/// first n are used, in order, as shadows 1..=n. `seed` fixes the whitening
/// keystream; `None` draws a fresh random seed.
///
/// Returns the n serialized shadow images, index i holding point identity
/// i+1.
///
/// # Errors
/// - [`VssError::UnsupportedFormat`] if the secret or a carrier is not an
///   8-bit BMP.
/// - [`VssError::InvalidParameters`] for out-of-range k/n, a secret length
///   not divisible by k, or fewer than n carriers.
/// - [`VssError::CapacityExceeded`] if a carrier is too small for its share
///   stream even after full bit-plane escalation.
pub fn split_secret(
    secret_bmp: &[u8],
    carrier_bmps: &[Vec<u8>],
    k: usize,
    n: usize,
    seed: Option<u16>,
) -> Result<Vec<Vec<u8>>> {
    progress::init(n as u32 + 1);
    progress::check_cancelled()?;

    // 1. Parse the secret and validate parameters before any work.
    let secret = BmpImage::from_bytes(secret_bmp)?;
    validate_params(k, n, secret.pixels().len())?;
    if carrier_bmps.len() < n {
        return Err(VssError::InvalidParameters("fewer carriers than shadows"));
    }

    // 2. Whiten with the (possibly fresh) seed.
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let whitened = Zeroizing::new(keystream::whiten(seed, secret.pixels()));

    // 3. Evaluate all n share streams.
    let shadows = generate_shadows(&whitened, k, n)?;
    let group_count = whitened.len() / k;
    progress::advance();

    // 4. Embed each stream into its carrier and attach metadata.
    let out = build_all_shadows(&secret, &carrier_bmps[..n], &shadows, seed, group_count)?;

    progress::finish();
    Ok(out)
}

#[cfg(not(feature = "parallel"))]
fn build_all_shadows(
    secret: &BmpImage,
    carriers: &[Vec<u8>],
    shadows: &[ShadowShares],
    seed: u16,
    group_count: usize,
) -> Result<Vec<Vec<u8>>> {
    carriers
        .iter()
        .zip(shadows)
        .enumerate()
        .map(|(i, (carrier, shares))| {
            progress::check_cancelled()?;
            let bytes = build_shadow(secret, carrier, shares, i, seed, group_count)?;
            progress::advance();
            Ok(bytes)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn build_all_shadows(
    secret: &BmpImage,
    carriers: &[Vec<u8>],
    shadows: &[ShadowShares],
    seed: u16,
    group_count: usize,
) -> Result<Vec<Vec<u8>>> {
    use rayon::prelude::*;
    carriers
        .par_iter()
        .zip(shadows)
        .enumerate()
        .map(|(i, (carrier, shares))| {
            progress::check_cancelled()?;
            let bytes = build_shadow(secret, carrier, shares, i, seed, group_count)?;
            progress::advance();
            Ok(bytes)
        })
        .collect()
}

/// Build one serialized shadow: crop the carrier to the secret's dimensions
/// if it is larger, embed the share stream, attach the secret's header and
/// the scheme metadata.
fn build_shadow(
    secret: &BmpImage,
    carrier_bytes: &[u8],
    shares: &ShadowShares,
    idx: usize,
    seed: u16,
    group_count: usize,
) -> Result<Vec<u8>> {
    let carrier = BmpImage::from_bytes(carrier_bytes)?;

    let pixels = if carrier.width() == secret.width() && carrier.height() == secret.height() {
        carrier.pixels().to_vec()
    } else {
        // A carrier smaller than the secret in either dimension cannot be
        // cropped to match and therefore cannot become this shadow.
        carrier
            .crop_centered(secret.width(), secret.height())
            .map_err(|_| VssError::CapacityExceeded { shadow: idx })?
            .pixels()
            .to_vec()
    };

    let stego = embed_shadow(&pixels, shares, idx)?;

    let mut shadow = BmpImage::from_parts(secret.header().to_vec(), stego);
    shadow.write_reserved(SEED_OFFSET, 2, u32::from(seed))?;
    shadow.write_reserved(POINT_OFFSET, 2, u32::from(shares.point))?;
    shadow.write_reserved(GROUP_COUNT_OFFSET, 3, group_count as u32)?;
    Ok(shadow.to_bytes())
}

/// Recombine a secret BMP from at least k shadow BMPs.
///
/// The first k entries of `shadow_bmps` are used; any k distinct shadows
/// recover the identical secret regardless of order. The seed and group
/// count come from the shadows' header metadata.
///
/// # Errors
/// - [`VssError::InsufficientShadows`] with fewer than k shadows.
/// - [`VssError::SingularSystem`] if two shadows report the same point.
/// - [`VssError::InvalidParameters`] if shadows disagree on seed or group
///   count, or carry no point identity.
/// - [`VssError::CapacityExceeded`] if a shadow's pixel buffer is too small
///   for the declared group count.
pub fn recombine_secret(shadow_bmps: &[Vec<u8>], k: usize) -> Result<Vec<u8>> {
    progress::init(k as u32 + 1);
    progress::check_cancelled()?;

    if !(crate::vss::MIN_K..=crate::vss::MAX_K).contains(&k) {
        return Err(VssError::InvalidParameters("k must be between 2 and 10"));
    }
    if shadow_bmps.len() < k {
        return Err(VssError::InsufficientShadows { have: shadow_bmps.len(), need: k });
    }

    // 1. Parse the first k shadows and pull their metadata + share streams.
    let mut seed = 0u16;
    let mut group_count = 0usize;
    let mut header: Vec<u8> = Vec::new();
    let mut shares: Vec<ShadowShares> = Vec::with_capacity(k);

    for (i, bytes) in shadow_bmps[..k].iter().enumerate() {
        progress::check_cancelled()?;
        let img = BmpImage::from_bytes(bytes)?;

        let this_seed = img.read_reserved(SEED_OFFSET, 2)? as u16;
        let point = img.read_reserved(POINT_OFFSET, 2)? as u16;
        let this_groups = img.read_reserved(GROUP_COUNT_OFFSET, 3)? as usize;

        if point == 0 {
            return Err(VssError::InvalidParameters("shadow carries no point identity"));
        }
        if i == 0 {
            seed = this_seed;
            group_count = this_groups;
            header = img.header().to_vec();
        } else {
            if this_seed != seed {
                return Err(VssError::InvalidParameters("shadows disagree on seed"));
            }
            if this_groups != group_count {
                return Err(VssError::InvalidParameters("shadows disagree on group count"));
            }
        }

        let (values, border) = crate::vss::bitplane::extract(img.pixels(), group_count)
            .ok_or(VssError::CapacityExceeded { shadow: i })?;
        shares.push(ShadowShares { point, values, border });
        progress::advance();
    }

    // 2. Solve every group and undo the whitening.
    let whitened = Zeroizing::new(recover::reconstruct(&shares, k)?);
    let secret_pixels = keystream::unwhiten(seed, &whitened);
    progress::advance();

    // 3. Reassemble the secret image from the shadow header, with the
    //    metadata fields cleared back to an ordinary BMP.
    let mut out = BmpImage::from_parts(header, secret_pixels);
    out.write_reserved(SEED_OFFSET, 2, 0)?;
    out.write_reserved(POINT_OFFSET, 2, 0)?;
    out.write_reserved(IMAGE_SIZE_OFFSET, 4, out.pixels().len() as u32)?;

    progress::finish();
    Ok(out.to_bytes())
}
