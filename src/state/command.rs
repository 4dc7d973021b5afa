// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Command frame builders, used by hosts that talk to the device.
//!
//! The device side never decodes into this enum: routing is done on raw bytes
//! by [`dispatch`](crate::dispatch::dispatch).

use byteorder::{ByteOrder, LittleEndian};

use crate::config::{
    AMOUNT_LEN, CLA_WALLET, DONATE_FRAME_LEN, HEADER_LEN, INS_ACKNOWLEDGE, INS_DONATE,
    SIGNATURE_LEN,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Donate {
        amount: u32,
        signature: [u8; SIGNATURE_LEN],
    },
    Acknowledge,
}

impl Command {
    /// The exact bytes a signer must sign for `amount`.
    pub fn amount_message(amount: u32) -> [u8; AMOUNT_LEN] {
        let mut message = [0u8; AMOUNT_LEN];
        LittleEndian::write_u32(&mut message, amount);
        message
    }

    /// Encodes into `out` and returns the frame length.
    pub fn encode(&self, out: &mut [u8; DONATE_FRAME_LEN]) -> usize {
        out[0] = CLA_WALLET;
        match self {
            Command::Donate { amount, signature } => {
                out[1] = INS_DONATE;
                out[HEADER_LEN..HEADER_LEN + AMOUNT_LEN]
                    .copy_from_slice(&Self::amount_message(*amount));
                out[HEADER_LEN + AMOUNT_LEN..].copy_from_slice(signature);
                DONATE_FRAME_LEN
            }
            Command::Acknowledge => {
                out[1] = INS_ACKNOWLEDGE;
                HEADER_LEN
            }
        }
    }
}
