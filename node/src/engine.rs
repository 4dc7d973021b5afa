// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use donation_core::storage::log::AppendLog;
use donation_core::storage::media::LogMedia;
use donation_core::verifier::Ed25519Verifier;
use donation_core::DonationCore;
use tokio::sync::Mutex;

use crate::config::NodeConfig;
use crate::errors::NodeResult;
use crate::media::FileMedia;

pub type NodeCore<M> = DonationCore<M, Ed25519Verifier>;

/// The async mutex is what keeps frame handling one-at-a-time across
/// connections.
pub type SharedCore<M> = Arc<Mutex<NodeCore<M>>>;

/// Builds the core over any media, recovering the counter from it.
pub fn build_core<M: LogMedia>(cfg: &NodeConfig, media: M) -> NodeResult<NodeCore<M>> {
    let log = AppendLog::recover(media)?;
    let verifier = Ed25519Verifier::from_bytes(&cfg.verifying_key_bytes()?)?;
    tracing::info!(
        sequence = log.sequence(),
        slots = log.slot_count(),
        signer = %hex::encode(verifier.public_key()),
        "core ready"
    );
    Ok(DonationCore::new(log, verifier, cfg.core_config()))
}

/// Core over the configured log file.
pub fn open_core(cfg: &NodeConfig) -> NodeResult<NodeCore<FileMedia>> {
    let media = FileMedia::open(&cfg.log_path, cfg.log_slots)?;
    build_core(cfg, media)
}

pub fn share<M: LogMedia>(core: NodeCore<M>) -> SharedCore<M> {
    Arc::new(Mutex::new(core))
}
