// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Seeded keystream generation and secret whitening.
//!
//! The secret is masked byte-wise with a deterministic keystream before it is
//! split into shares, so runs of equal pixels do not produce runs of equal
//! share values. The keystream is derived from a 16-bit seed stored in each
//! shadow's header metadata; the recovering party regenerates the identical
//! stream from that seed alone.
//!
//! # Cross-platform portability
//!
//! The stream is drawn from a ChaCha20 PRNG seeded only by the 16-bit seed.
//! ChaCha20 output is specified byte-exact, so the same seed and length give
//! a bit-identical stream on every platform and architecture. Whitening is
//! plain byte arithmetic mod 256 — distinct from the mod-257 field used for
//! sharing.

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroizing;

/// Expand the 16-bit seed into a ChaCha20 seed: little-endian seed bytes in
/// the first two positions, zeros elsewhere. Public contract — the decoder
/// must build the exact same expansion.
fn expand_seed(seed: u16) -> [u8; 32] {
    let mut full = [0u8; 32];
    full[..2].copy_from_slice(&seed.to_le_bytes());
    full
}

/// Generate `len` keystream bytes for `seed`.
pub fn keystream(seed: u16, len: usize) -> Zeroizing<Vec<u8>> {
    let mut rng = ChaCha20Rng::from_seed(expand_seed(seed));
    let mut out = Zeroizing::new(vec![0u8; len]);
    rng.fill_bytes(&mut out);
    out
}

/// Mask a secret: `whitened[i] = (secret[i] + keystream[i]) mod 256`.
pub fn whiten(seed: u16, secret: &[u8]) -> Vec<u8> {
    let ks = keystream(seed, secret.len());
    secret
        .iter()
        .zip(ks.iter())
        .map(|(&s, &k)| s.wrapping_add(k))
        .collect()
}

/// Invert [`whiten`]: `secret[i] = (whitened[i] - keystream[i] + 256) mod 256`.
pub fn unwhiten(seed: u16, whitened: &[u8]) -> Vec<u8> {
    let ks = keystream(seed, whitened.len());
    whitened
        .iter()
        .zip(ks.iter())
        .map(|(&w, &k)| w.wrapping_sub(k))
        .collect()
}
