// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Startup integrity gate.
//!
//! Runs once, before the frame loop exists. A mismatch never returns.

use crate::config::DIGEST_LEN;
use crate::ct::constant_time_equal;
use crate::error::{CoreError, CoreResult};

/// Digest engine measuring the running image.
pub trait FirmwareDigest {
    fn digest(&self) -> [u8; DIGEST_LEN];
}

/// BLAKE3 over an in-memory image.
pub struct Blake3Image<'a> {
    image: &'a [u8],
}

impl<'a> Blake3Image<'a> {
    pub fn new(image: &'a [u8]) -> Self {
        Self { image }
    }
}

impl FirmwareDigest for Blake3Image<'_> {
    fn digest(&self) -> [u8; DIGEST_LEN] {
        *blake3::hash(self.image).as_bytes()
    }
}

/// Visible failure output (LED, buzzer, log line). Never returns.
pub trait FailureIndicator {
    fn halt(&mut self) -> !;
}

/// Constant-time comparison of a measured digest against the expected one.
pub fn check_integrity(computed: &[u8; DIGEST_LEN], expected: &[u8; DIGEST_LEN]) -> CoreResult<()> {
    if constant_time_equal(computed, expected, DIGEST_LEN) != 0 {
        return Err(CoreError::IntegrityMismatch);
    }
    Ok(())
}

/// Measures the image and either returns (match) or halts via `indicator`.
pub fn integrity_gate<D, F>(engine: &D, expected: &[u8; DIGEST_LEN], indicator: &mut F)
where
    D: FirmwareDigest + ?Sized,
    F: FailureIndicator + ?Sized,
{
    let computed = engine.digest();
    match check_integrity(&computed, expected) {
        Ok(()) => tracing::info!("firmware integrity verified"),
        Err(e) => {
            tracing::error!(error = %e, "refusing to start");
            indicator.halt()
        }
    }
}
