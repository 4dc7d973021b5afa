// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Host side of the startup integrity gate.

use std::path::Path;

use donation_core::config::DIGEST_LEN;
use donation_core::integrity::{integrity_gate, Blake3Image, FailureIndicator, FirmwareDigest};

use crate::config::NodeConfig;
use crate::errors::NodeResult;

/// Exit status used when the image digest does not match (EX_CONFIG).
pub const EXIT_INTEGRITY: i32 = 78;

/// Logs and terminates the process. The host has no LED.
pub struct ExitIndicator;

impl FailureIndicator for ExitIndicator {
    fn halt(&mut self) -> ! {
        tracing::error!("FIRMWARE INTEGRITY FAILURE: halting");
        eprintln!("FIRMWARE INTEGRITY FAILURE");
        std::process::exit(EXIT_INTEGRITY)
    }
}

pub fn measure_image(path: &Path) -> NodeResult<[u8; DIGEST_LEN]> {
    let image = std::fs::read(path)?;
    tracing::info!(?path, bytes = image.len(), "measuring firmware image");
    Ok(Blake3Image::new(&image).digest())
}

/// A digest taken ahead of the gate.
struct Measured([u8; DIGEST_LEN]);

impl FirmwareDigest for Measured {
    fn digest(&self) -> [u8; DIGEST_LEN] {
        self.0
    }
}

/// Runs before anything else. Returns only if the image matches; a missing
/// expected digest is a config error, which also stops startup.
pub fn startup_gate(cfg: &NodeConfig) -> NodeResult<()> {
    let expected = cfg.expected_digest_bytes()?;
    let measured = Measured(measure_image(&cfg.firmware_image_path()?)?);
    integrity_gate(&measured, &expected, &mut ExitIndicator);
    Ok(())
}
