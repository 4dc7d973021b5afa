// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::HashMap;
use std::io::Write;

use donation_core::config::{DigitOrder, CLA_WALLET, DEFAULT_LOG_SLOTS};
use donation_core::integrity::check_integrity;
use donation_core::CoreError;
use donation_node::config::{NodeConfig, BUILD_EXPECTED_DIGEST};
use donation_node::errors::NodeError;
use donation_node::integrity::{measure_image, startup_gate};

#[test]
fn test_defaults() {
    let cfg = NodeConfig::default();
    assert_eq!(cfg.log_slots, DEFAULT_LOG_SLOTS);
    assert_eq!(cfg.expected_class, CLA_WALLET);
    assert_eq!(cfg.digit_order, DigitOrder::LeastSignificantFirst);
    assert!(matches!(cfg.verifying_key_bytes(), Err(NodeError::Config(_))));
}

#[test]
fn test_env_overrides() {
    let vars: HashMap<&str, &str> = [
        ("DONATION_BIND_ADDR", "0.0.0.0:7000"),
        ("DONATION_LOG_SLOTS", "128"),
        ("DONATION_VERIFYING_KEY", "ab"),
    ]
    .into_iter()
    .collect();

    let mut cfg = NodeConfig::default();
    cfg.apply_env(|k| vars.get(k).map(|v| v.to_string())).unwrap();
    assert_eq!(cfg.bind_addr.port(), 7000);
    assert_eq!(cfg.log_slots, 128);
    // Wrong length for an Ed25519 key.
    assert!(matches!(cfg.verifying_key_bytes(), Err(NodeError::Hex(_))));

    let mut cfg = NodeConfig::default();
    let bad = cfg.apply_env(|k| (k == "DONATION_BIND_ADDR").then(|| "nonsense".to_string()));
    assert!(matches!(bad, Err(NodeError::Config(_))));
}

#[test]
fn test_json_file_with_partial_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.json");
    std::fs::write(
        &path,
        br#"{ "log_slots": 32, "digit_order": "MostSignificantFirst" }"#,
    )
    .unwrap();

    let cfg = NodeConfig::from_file(&path).unwrap();
    assert_eq!(cfg.log_slots, 32);
    assert_eq!(cfg.digit_order, DigitOrder::MostSignificantFirst);
    assert_eq!(cfg.expected_class, CLA_WALLET);
    assert_eq!(cfg.core_config().digit_order, DigitOrder::MostSignificantFirst);
}

#[test]
fn test_image_verification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firmware.bin");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"firmware image bytes")
        .unwrap();

    let digest = measure_image(&path).unwrap();
    assert_eq!(digest, *blake3::hash(b"firmware image bytes").as_bytes());
    check_integrity(&digest, &digest).unwrap();

    let mut wrong = digest;
    wrong[0] ^= 0xFF;
    assert_eq!(check_integrity(&digest, &wrong), Err(CoreError::IntegrityMismatch));

    let mut cfg = NodeConfig::default();
    cfg.firmware_image = Some(path.clone());
    cfg.expected_digest = Some(hex::encode(digest));
    if BUILD_EXPECTED_DIGEST.is_none() {
        assert_eq!(cfg.expected_digest_bytes().unwrap(), digest);
        // Matching image: the gate returns instead of exiting.
        startup_gate(&cfg).unwrap();
    }
}

#[test]
fn test_compiled_digest_needs_explicit_image() {
    let cfg = NodeConfig::default();
    let digest = "00".repeat(32);
    assert!(matches!(
        cfg.image_path_for(Some(&digest)),
        Err(NodeError::Config(_))
    ));
    assert_eq!(cfg.image_path_for(None).unwrap(), std::env::current_exe().unwrap());

    let mut cfg = NodeConfig::default();
    cfg.firmware_image = Some("firmware.bin".into());
    assert_eq!(
        cfg.image_path_for(Some(&digest)).unwrap(),
        std::path::PathBuf::from("firmware.bin")
    );
}
