// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Shared test doubles.
#![allow(dead_code)]

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use ed25519_dalek::{Signer, SigningKey};

use crate::config::{AMOUNT_LEN, CoreConfig, RECORD_LEN, SIGNATURE_LEN};
use crate::engine::DonationCore;
use crate::state::command::Command;
use crate::storage::log::AppendLog;
use crate::storage::media::{LogMedia, MediaError, MediaResult, RamMedia};
use crate::transport::Transmitter;
use crate::verifier::SignatureVerifier;

pub const SLOTS: usize = 8;

/// Accepts or rejects everything, and remembers what it was shown.
pub struct FixedVerdict {
    pub accept: bool,
    pub calls: Cell<usize>,
    pub last_signature: RefCell<Option<[u8; SIGNATURE_LEN]>>,
}

impl FixedVerdict {
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            calls: Cell::new(0),
            last_signature: RefCell::new(None),
        }
    }
}

impl SignatureVerifier for FixedVerdict {
    fn check(&self, _message: &[u8; AMOUNT_LEN], signature: &[u8; SIGNATURE_LEN]) -> bool {
        self.calls.set(self.calls.get() + 1);
        *self.last_signature.borrow_mut() = Some(*signature);
        self.accept
    }
}

/// Media whose writes can be made to fail on demand.
pub struct FlakyMedia {
    pub inner: RamMedia<SLOTS>,
    pub fail_writes: bool,
}

impl FlakyMedia {
    pub fn new() -> Self {
        Self {
            inner: RamMedia::new(),
            fail_writes: false,
        }
    }
}

impl LogMedia for FlakyMedia {
    fn slot_count(&self) -> usize {
        self.inner.slot_count()
    }

    fn write(&mut self, slot: usize, bytes: &[u8; RECORD_LEN]) -> MediaResult<()> {
        if self.fail_writes {
            return Err(MediaError::ProgramFailed(slot));
        }
        self.inner.write(slot, bytes)
    }

    fn read(&self, slot: usize) -> MediaResult<[u8; RECORD_LEN]> {
        self.inner.read(slot)
    }
}

#[derive(Default)]
pub struct VecTransmitter {
    pub sent: Vec<Vec<u8>>,
}

impl Transmitter for VecTransmitter {
    type Error = ();

    fn transmit(&mut self, reply: &[u8]) -> Result<(), ()> {
        self.sent.push(reply.to_vec());
        Ok(())
    }
}

pub fn core_with(accept: bool) -> DonationCore<RamMedia<SLOTS>, FixedVerdict> {
    DonationCore::new(
        AppendLog::new(RamMedia::new()),
        FixedVerdict::new(accept),
        CoreConfig::default(),
    )
}

pub fn donate_frame(amount: u32, signature: [u8; SIGNATURE_LEN]) -> Vec<u8> {
    let mut out = [0u8; crate::config::DONATE_FRAME_LEN];
    let n = Command::Donate { amount, signature }.encode(&mut out);
    out[..n].to_vec()
}

pub fn ack_frame() -> Vec<u8> {
    let mut out = [0u8; crate::config::DONATE_FRAME_LEN];
    let n = Command::Acknowledge.encode(&mut out);
    out[..n].to_vec()
}

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

pub fn sign_amount(key: &SigningKey, amount: u32) -> [u8; SIGNATURE_LEN] {
    key.sign(&Command::amount_message(amount)).to_bytes()
}
