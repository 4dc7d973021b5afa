// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Entropy health task. Runs beside the frame server and shares nothing
//! with it.

use std::path::PathBuf;
use std::time::Duration;

use donation_core::health::{EntropyHealth, HealthStatus};
use tokio::io::AsyncReadExt;

use crate::errors::{NodeError, NodeResult};

const SAMPLES_PER_TICK: usize = 64;

/// Samples `source` every `interval` until the health test fails.
pub async fn monitor_entropy(source: PathBuf, interval: Duration, cutoff: u32) -> NodeResult<()> {
    let mut health = EntropyHealth::new(cutoff);
    let mut file = tokio::fs::File::open(&source).await?;
    let mut ticker = tokio::time::interval(interval);
    let mut samples = [0u8; SAMPLES_PER_TICK];

    loop {
        ticker.tick().await;
        file.read_exact(&mut samples).await?;
        if health.feed_all(&samples) == HealthStatus::Failed {
            tracing::error!(?source, total = health.samples(), "entropy health test failed");
            return Err(NodeError::EntropyFailed);
        }
        tracing::trace!(total = health.samples(), "entropy healthy");
    }
}
