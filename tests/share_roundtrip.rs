// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Round-trip tests for the numeric core: whitening, share generation,
//! bit-plane embedding and reconstruction, without any BMP container.

use sombra_core::vss::{bitplane, keystream};
use sombra_core::{generate_shadows, reconstruct, ShadowShares, VssError};

/// Split, push every stream through a carrier buffer, and recombine from the
/// given subset of shadow indices.
fn roundtrip_subset(secret: &[u8], k: usize, n: usize, seed: u16, subset: &[usize]) -> Vec<u8> {
    let whitened = keystream::whiten(seed, secret);
    let shadows = generate_shadows(&whitened, k, n).unwrap();

    // One carrier per shadow, same size as the secret (as in the pipeline).
    let carriers: Vec<Vec<u8>> = (0..n).map(|i| vec![(i * 41) as u8; secret.len()]).collect();
    let stego: Vec<Vec<u8>> = shadows
        .iter()
        .zip(&carriers)
        .map(|(s, c)| bitplane::embed(c, &s.values, &s.border).unwrap())
        .collect();

    let group_count = secret.len() / k;
    let shares: Vec<ShadowShares> = subset
        .iter()
        .map(|&i| {
            let (values, border) = bitplane::extract(&stego[i], group_count).unwrap();
            ShadowShares { point: shadows[i].point, values, border }
        })
        .collect();

    let whitened_back = reconstruct(&shares, k).unwrap();
    keystream::unwhiten(seed, &whitened_back)
}

#[test]
fn example_end_to_end() {
    // The worked example: [10,20,30,40,50,60], k=3, n=5, seed=10 — every
    // 3-subset of the 5 shadows recovers the secret exactly.
    let secret = [10u8, 20, 30, 40, 50, 60];
    for a in 0..5 {
        for b in a + 1..5 {
            for c in b + 1..5 {
                let recovered = roundtrip_subset(&secret, 3, 5, 10, &[a, b, c]);
                assert_eq!(recovered, secret, "subset ({a},{b},{c})");
            }
        }
    }
}

#[test]
fn subset_order_does_not_matter() {
    let secret = [10u8, 20, 30, 40, 50, 60];
    let forward = roundtrip_subset(&secret, 3, 5, 10, &[0, 2, 4]);
    let backward = roundtrip_subset(&secret, 3, 5, 10, &[4, 2, 0]);
    assert_eq!(forward, secret);
    assert_eq!(backward, secret);
}

#[test]
fn threshold_correctness_across_schemes() {
    for (k, n) in [(2usize, 2usize), (2, 5), (4, 6), (8, 9), (10, 10)] {
        let secret: Vec<u8> = (0..(k * 7)).map(|i| (i * 89 + 3) as u8).collect();
        let subset: Vec<usize> = (0..k).collect();
        let recovered = roundtrip_subset(&secret, k, n, 0xABCD, &subset);
        assert_eq!(recovered, secret, "k={k} n={n}");

        // The "last k" shadows work just as well as the first k.
        let subset: Vec<usize> = (n - k..n).collect();
        let recovered = roundtrip_subset(&secret, k, n, 0xABCD, &subset);
        assert_eq!(recovered, secret, "k={k} n={n} (tail subset)");
    }
}

#[test]
fn fewer_than_k_shadows_fail() {
    let secret = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let whitened = keystream::whiten(7, &secret);
    let shadows = generate_shadows(&whitened, 4, 5).unwrap();
    match reconstruct(&shadows[..3], 4) {
        Err(VssError::InsufficientShadows { have, need }) => assert_eq!((have, need), (3, 4)),
        other => panic!("expected InsufficientShadows, got {other:?}"),
    }
}

#[test]
fn border_evaluation_survives_embedding() {
    // [254, 1] evaluates to 255 at x=1 and 256 at x=2 — the colliding pair.
    // Both must survive the trip through a carrier.
    let group = [254u8, 1];
    let shadows = generate_shadows(&group, 2, 2).unwrap();
    assert_eq!(shadows[1].border, [true], "P(2) = 256 must raise the flag");

    let carrier = vec![0x99u8; 16];
    for s in &shadows {
        let stego = bitplane::embed(&carrier, &s.values, &s.border).unwrap();
        let (values, border) = bitplane::extract(&stego, 1).unwrap();
        assert_eq!(values, s.values);
        assert_eq!(border, s.border);
    }

    let recovered = reconstruct(&shadows, 2).unwrap();
    assert_eq!(recovered, group);
}

#[test]
fn whitening_is_keyed() {
    // The same secret under two seeds produces different share streams.
    let secret = [5u8; 8];
    let s1 = generate_shadows(&keystream::whiten(1, &secret), 2, 2).unwrap();
    let s2 = generate_shadows(&keystream::whiten(2, &secret), 2, 2).unwrap();
    assert_ne!(s1[0].values, s2[0].values);
}

#[test]
fn deterministic_given_seed() {
    let secret: Vec<u8> = (0..32).collect();
    let a = roundtrip_subset(&secret, 4, 6, 0x0BEB, &[1, 3, 4, 5]);
    let b = roundtrip_subset(&secret, 4, 6, 0x0BEB, &[1, 3, 4, 5]);
    assert_eq!(a, b);
    assert_eq!(a, secret);
}
