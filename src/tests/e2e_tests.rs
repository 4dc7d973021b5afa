// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Frame-level scenarios through `DonationCore`, the same entry point the
//! firmware loop and the node use.

use crate::config::{CoreConfig, DigitOrder, ACK_PREFIX, MAX_FRAME_LEN, STATUS_OK};
use crate::engine::DonationCore;
use crate::storage::log::AppendLog;
use crate::storage::media::RamMedia;
use crate::tests::support::{
    ack_frame, core_with, donate_frame, sign_amount, signing_key, VecTransmitter, SLOTS,
};
use crate::verifier::Ed25519Verifier;
use std::vec::Vec;

#[test]
fn test_69_byte_donate_is_dropped() {
    let mut core = core_with(true);
    let mut frame = donate_frame(100, [1u8; 64]);
    frame.pop();
    assert_eq!(frame.len(), 69);

    assert!(core.handle_frame(&frame).is_none());
    assert_eq!(core.wallet().sequence(), 0);
    assert!(!core.wallet().is_pending());
}

#[test]
fn test_donate_then_acknowledge_then_nothing() {
    let mut core = core_with(true);
    let mut tx = VecTransmitter::default();

    assert!(core.on_frame_received(&donate_frame(100, [1u8; 64]), &mut tx));
    assert_eq!(tx.sent.last().unwrap().as_slice(), &STATUS_OK);
    assert_eq!(core.wallet().sequence(), 1);
    assert!(core.wallet().is_pending());

    assert!(core.on_frame_received(&ack_frame(), &mut tx));
    let mut expected = ACK_PREFIX.to_vec();
    expected.push(b'1');
    assert_eq!(tx.sent.last().unwrap(), &expected);
    assert!(!core.wallet().is_pending());

    assert!(!core.on_frame_received(&ack_frame(), &mut tx));
    assert_eq!(tx.sent.len(), 2);
    assert_eq!(core.wallet().sequence(), 1);
}

#[test]
fn test_241_byte_frame_dropped_at_transport_boundary() {
    let mut core = core_with(true);
    let mut frame = donate_frame(100, [1u8; 64]);
    frame.resize(MAX_FRAME_LEN + 1, 0);

    assert!(core.handle_frame(&frame).is_none());
    assert!(core.handle_frame(&[]).is_none());
    assert_eq!(core.wallet().sequence(), 0);
    assert!(!core.wallet().is_pending());
}

#[test]
fn test_counter_tracks_accepted_donations_only() {
    let mut core = core_with(true);
    for i in 1..=12u32 {
        assert_eq!(core.handle_frame(&donate_frame(i, [2u8; 64])).unwrap(), &STATUS_OK);
        assert_eq!(core.wallet().sequence(), i);
    }

    let mut rejecting = core_with(false);
    assert!(rejecting.handle_frame(&donate_frame(5, [2u8; 64])).is_none());
    assert_eq!(rejecting.wallet().sequence(), 0);
}

#[test]
fn test_acknowledge_renders_in_configured_order() {
    let mut compatible = core_with(true);
    let config = CoreConfig {
        digit_order: DigitOrder::MostSignificantFirst,
        ..CoreConfig::default()
    };
    let mut conventional = DonationCore::new(
        AppendLog::new(RamMedia::<SLOTS>::new()),
        crate::tests::support::FixedVerdict::new(true),
        config,
    );

    for _ in 0..12 {
        conventional.handle_frame(&donate_frame(1, [0u8; 64])).unwrap();
        compatible.handle_frame(&donate_frame(1, [0u8; 64])).unwrap();
    }

    // Default keeps the reversed layout deployed readers expect.
    let reply: Vec<u8> = compatible.handle_frame(&ack_frame()).unwrap().to_vec();
    assert_eq!(&reply[ACK_PREFIX.len()..], b"21");
    let reply: Vec<u8> = conventional.handle_frame(&ack_frame()).unwrap().to_vec();
    assert_eq!(&reply[ACK_PREFIX.len()..], b"12");
}

#[test]
fn test_pending_is_a_flag_not_a_count() {
    let mut core = core_with(true);
    core.handle_frame(&donate_frame(1, [0u8; 64])).unwrap();
    core.handle_frame(&donate_frame(2, [0u8; 64])).unwrap();

    let reply = core.handle_frame(&ack_frame()).unwrap().to_vec();
    assert_eq!(reply.last(), Some(&b'2'));
    assert!(core.handle_frame(&ack_frame()).is_none());
}

#[test]
fn test_real_signatures_end_to_end() {
    let key = signing_key();
    let verifier = Ed25519Verifier::from_bytes(&key.verifying_key().to_bytes()).unwrap();
    let mut core = DonationCore::new(
        AppendLog::new(RamMedia::<SLOTS>::new()),
        verifier,
        CoreConfig::default(),
    );

    let good = donate_frame(750, sign_amount(&key, 750));
    assert_eq!(core.handle_frame(&good).unwrap(), &STATUS_OK);

    // Signature for 750 replayed against 751.
    let forged = donate_frame(751, sign_amount(&key, 750));
    assert!(core.handle_frame(&forged).is_none());

    assert_eq!(core.wallet().sequence(), 1);
    assert_eq!(core.wallet().log().get(1).unwrap().amount, 750);
}

#[test]
fn test_state_survives_restart_via_recovery() {
    let mut core = core_with(true);
    for amount in [10u32, 20, 30] {
        core.handle_frame(&donate_frame(amount, [0u8; 64])).unwrap();
    }
    let (log, verifier) = core.into_parts();

    let log = AppendLog::recover(log.into_media()).unwrap();
    let mut core = DonationCore::new(log, verifier, CoreConfig::default());
    assert_eq!(core.wallet().sequence(), 3);
    // Pending does not survive a reboot.
    assert!(core.handle_frame(&ack_frame()).is_none());

    core.handle_frame(&donate_frame(40, [0u8; 64])).unwrap();
    assert_eq!(core.wallet().sequence(), 4);
}

#[test]
fn test_acknowledged_id_not_reused_after_corrupt_reboot() {
    let mut core = core_with(true);
    for amount in [10u32, 20, 30] {
        core.handle_frame(&donate_frame(amount, [0u8; 64])).unwrap();
    }
    let first = core.handle_frame(&ack_frame()).unwrap().to_vec();

    let (log, verifier) = core.into_parts();
    let mut media = log.into_media();
    media.raw_slot_mut(3).unwrap()[5] ^= 0x01;

    let log = AppendLog::recover(media).unwrap();
    let mut core = DonationCore::new(log, verifier, CoreConfig::default());
    core.handle_frame(&donate_frame(40, [0u8; 64])).unwrap();
    let second = core.handle_frame(&ack_frame()).unwrap().to_vec();

    assert_ne!(first, second);
    assert_eq!(core.wallet().sequence(), 4);
}
