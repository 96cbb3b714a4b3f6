// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Global split/recombine progress tracking.
//!
//! Uses atomics so it is safe to call from rayon worker threads. Frontends
//! poll [`get`] to drive a progress bar and may request cancellation; the
//! pipelines check the flag at shadow boundaries.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::error::VssError;

static STEP: AtomicU32 = AtomicU32::new(0);
static TOTAL: AtomicU32 = AtomicU32::new(0);
static CANCELLED: AtomicBool = AtomicBool::new(false);

/// Reset progress to 0 and set the total step count.
/// Also resets the cancellation flag so a fresh operation starts clean.
pub fn init(total: u32) {
    CANCELLED.store(false, Ordering::Relaxed);
    STEP.store(0, Ordering::Relaxed);
    TOTAL.store(total, Ordering::Relaxed);
}

/// Request cancellation of the current operation.
///
/// The pipelines check this flag at natural loop boundaries and return
/// `Err(VssError::Cancelled)` when set.
pub fn cancel() {
    CANCELLED.store(true, Ordering::Relaxed);
}

/// Returns `true` if cancellation has been requested.
pub fn is_cancelled() -> bool {
    CANCELLED.load(Ordering::Relaxed)
}

/// Check for cancellation and return an error if requested.
pub fn check_cancelled() -> Result<(), VssError> {
    if is_cancelled() {
        Err(VssError::Cancelled)
    } else {
        Ok(())
    }
}

/// Advance progress by one step, capped at total so the bar never overshoots.
pub fn advance() {
    let total = TOTAL.load(Ordering::Relaxed);
    let _ = STEP.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
        if total == 0 || s < total {
            Some(s + 1)
        } else {
            Some(s)
        }
    });
}

/// Read the current (step, total) progress.
pub fn get() -> (u32, u32) {
    (STEP.load(Ordering::Relaxed), TOTAL.load(Ordering::Relaxed))
}

/// Mark progress as complete (step = total).
pub fn finish() {
    let t = TOTAL.load(Ordering::Relaxed);
    STEP.store(t, Ordering::Relaxed);
}
