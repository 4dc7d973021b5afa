// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Class byte every accepted command must carry.
pub const CLA_WALLET: u8 = 0x80;

/// Instruction: record a signed donation.
pub const INS_DONATE: u8 = 0x30;

/// Instruction: read the pending acknowledgment.
pub const INS_ACKNOWLEDGE: u8 = 0x40;

/// `[class][instruction]`
pub const HEADER_LEN: usize = 2;

/// Donation amount, u32 little-endian.
pub const AMOUNT_LEN: usize = 4;

/// Detached Ed25519 signature over the amount bytes.
pub const SIGNATURE_LEN: usize = 64;

/// A DONATE frame has exactly this length. Anything else is malformed.
pub const DONATE_FRAME_LEN: usize = HEADER_LEN + AMOUNT_LEN + SIGNATURE_LEN;

/// Upper bound enforced by the receiver before a frame reaches the dispatcher.
pub const MAX_FRAME_LEN: usize = 240;

/// Status word returned after a donation is recorded.
pub const STATUS_OK: [u8; 2] = [0x90, 0x00];

/// Fixed prefix of every acknowledgment reply.
pub const ACK_PREFIX: &[u8] = b"THANK YOU #";

/// Decimal digits of u32::MAX.
pub const MAX_DECIMAL_DIGITS: usize = 10;

/// Largest reply the core can produce.
pub const MAX_REPLY_LEN: usize = ACK_PREFIX.len() + MAX_DECIMAL_DIGITS;

/// `{sequence:u32}{amount:u32}{checksum:u32}`
pub const RECORD_LEN: usize = 12;

/// Bytes covered by the record checksum.
pub const RECORD_PAYLOAD_LEN: usize = 8;

/// Slot count used by the firmware and the node unless configured otherwise.
pub const DEFAULT_LOG_SLOTS: usize = 64;

/// Firmware digest width.
pub const DIGEST_LEN: usize = 32;

/// Value of an unprogrammed media byte.
pub const ERASED_BYTE: u8 = 0xFF;

/// Ordering of the decimal digits in an acknowledgment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigitOrder {
    /// Digits as generated by repeated division: 12 -> "21". This is the
    /// layout deployed readers already parse.
    #[default]
    LeastSignificantFirst,
    /// Conventional rendering: 12 -> "12". Opt-in.
    MostSignificantFirst,
}

/// Runtime knobs of the dispatch path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    pub expected_class: u8,
    pub digit_order: DigitOrder,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            expected_class: CLA_WALLET,
            digit_order: DigitOrder::default(),
        }
    }
}
