// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! # sombra-core
//!
//! Visual (k,n) secret sharing for 8-bit BMP images. A secret image is split
//! into n "shadow" images so that any k of them reconstruct it exactly while
//! k−1 reveal nothing:
//!
//! - Shares are polynomial evaluations over GF(257), one polynomial per
//!   group of k whitened secret bytes.
//! - Share streams hide inside ordinary carrier images via adaptive
//!   bit-plane LSB steganography (`vss::bitplane`), escalating into higher
//!   planes when a carrier is small.
//! - The BMP codec (`bmp` module) is zero-dependency (std only); scheme
//!   metadata travels in unused header bytes of each shadow.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sombra_core::{split_secret, recombine_secret};
//!
//! let secret = std::fs::read("secret.bmp").unwrap();
//! let carriers: Vec<Vec<u8>> = load_carriers(); // ≥ n ordered 8-bit BMPs
//! let shadows = split_secret(&secret, &carriers, 3, 5, None).unwrap();
//! let recovered = recombine_secret(&shadows[..3], 3).unwrap();
//! ```

pub mod bmp;
pub mod vss;

pub use bmp::error::{BmpError, Result as BmpResult};
pub use bmp::BmpImage;
pub use vss::progress;
pub use vss::{embed_shadow, generate_shadows, reconstruct, solve_vandermonde, ShadowShares};
pub use vss::{recombine_secret, split_secret, VssError};
pub use vss::{validate_params, MAX_K, MIN_K, MIN_N};
