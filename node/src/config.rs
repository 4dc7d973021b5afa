// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use donation_core::config::{CoreConfig, DigitOrder, CLA_WALLET, DEFAULT_LOG_SLOTS, DIGEST_LEN};
use donation_core::health::DEFAULT_REPETITION_CUTOFF;
use serde::{Deserialize, Serialize};

use crate::errors::{NodeError, NodeResult};

/// Points at an optional JSON file with any subset of [`NodeConfig`] fields.
pub const CONFIG_PATH_ENV: &str = "DONATION_NODE_CONFIG";

/// Expected firmware digest baked in at compile time. Takes precedence over
/// anything supplied at runtime.
pub const BUILD_EXPECTED_DIGEST: Option<&str> = option_env!("DONATION_EXPECTED_DIGEST");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    pub log_path: PathBuf,
    pub log_slots: usize,
    /// Hex-encoded Ed25519 public key of the donation signer.
    pub verifying_key: Option<String>,
    /// Image measured by the startup gate. Defaults to the running binary,
    /// unless a digest was compiled in.
    pub firmware_image: Option<PathBuf>,
    /// Hex-encoded BLAKE3 digest, used only without a build-time digest.
    pub expected_digest: Option<String>,
    pub expected_class: u8,
    pub digit_order: DigitOrder,
    pub entropy_source: Option<PathBuf>,
    pub entropy_interval_ms: u64,
    pub repetition_cutoff: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4040)),
            log_path: PathBuf::from("donations.log"),
            log_slots: DEFAULT_LOG_SLOTS,
            verifying_key: None,
            firmware_image: None,
            expected_digest: None,
            expected_class: CLA_WALLET,
            digit_order: DigitOrder::default(),
            entropy_source: None,
            entropy_interval_ms: 1000,
            repetition_cutoff: DEFAULT_REPETITION_CUTOFF,
        }
    }
}

impl NodeConfig {
    /// Defaults, then the JSON file named by `DONATION_NODE_CONFIG`, then
    /// individual `DONATION_*` variables.
    pub fn load() -> NodeResult<Self> {
        let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> NodeResult<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> NodeResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("DONATION_BIND_ADDR") {
            self.bind_addr = addr
                .parse()
                .map_err(|_| NodeError::Config(format!("invalid bind address {:?}", addr)))?;
        }
        if let Some(path) = lookup("DONATION_LOG_PATH") {
            self.log_path = PathBuf::from(path);
        }
        if let Some(slots) = lookup("DONATION_LOG_SLOTS") {
            self.log_slots = slots
                .parse()
                .map_err(|_| NodeError::Config(format!("invalid slot count {:?}", slots)))?;
        }
        if let Some(key) = lookup("DONATION_VERIFYING_KEY") {
            self.verifying_key = Some(key);
        }
        if let Some(path) = lookup("DONATION_FIRMWARE_IMAGE") {
            self.firmware_image = Some(PathBuf::from(path));
        }
        if let Some(digest) = lookup("DONATION_EXPECTED_DIGEST") {
            self.expected_digest = Some(digest);
        }
        if let Some(path) = lookup("DONATION_ENTROPY_SOURCE") {
            self.entropy_source = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn core_config(&self) -> CoreConfig {
        CoreConfig {
            expected_class: self.expected_class,
            digit_order: self.digit_order,
        }
    }

    pub fn verifying_key_bytes(&self) -> NodeResult<[u8; 32]> {
        let key = self
            .verifying_key
            .as_deref()
            .ok_or_else(|| NodeError::Config("no verifying key configured".into()))?;
        decode_fixed::<32>(key)
    }

    /// Build-time digest if one was compiled in, else the configured one.
    pub fn expected_digest_bytes(&self) -> NodeResult<[u8; DIGEST_LEN]> {
        let hex_digest = BUILD_EXPECTED_DIGEST
            .or(self.expected_digest.as_deref())
            .ok_or_else(|| NodeError::Config("no expected firmware digest".into()))?;
        decode_fixed::<DIGEST_LEN>(hex_digest)
    }

    pub fn firmware_image_path(&self) -> NodeResult<PathBuf> {
        self.image_path_for(BUILD_EXPECTED_DIGEST)
    }

    /// A binary cannot carry the digest of itself, so a compiled-in digest
    /// requires an explicit image to measure.
    pub fn image_path_for(&self, build_digest: Option<&str>) -> NodeResult<PathBuf> {
        match (&self.firmware_image, build_digest) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(_)) => Err(NodeError::Config(
                "build-time digest set: firmware_image must name the measured image".into(),
            )),
            (None, None) => Ok(std::env::current_exe()?),
        }
    }

    pub fn entropy_interval(&self) -> Duration {
        Duration::from_millis(self.entropy_interval_ms.max(1))
    }
}

fn decode_fixed<const N: usize>(hex_str: &str) -> NodeResult<[u8; N]> {
    let mut out = [0u8; N];
    hex::decode_to_slice(hex_str.trim(), &mut out)?;
    Ok(out)
}
