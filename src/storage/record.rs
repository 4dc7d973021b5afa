// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Log record definition.

use byteorder::{ByteOrder, LittleEndian};

use crate::config::{RECORD_LEN, RECORD_PAYLOAD_LEN};
use crate::crc::crc32;

/// Record identifier handed out by the append-only log. Starts at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Sequence(pub u32);

impl Sequence {
    /// `None` once the counter is exhausted; it never wraps.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Sequence)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogRecord {
    pub sequence: u32,
    pub amount: u32,
    pub checksum: u32,
}

impl LogRecord {
    /// Builds a record with a freshly computed checksum.
    pub fn new(sequence: Sequence, amount: u32) -> Self {
        let mut record = Self {
            sequence: sequence.0,
            amount,
            checksum: 0,
        };
        record.checksum = crc32(&record.payload());
        record
    }

    /// The 8 bytes covered by the checksum.
    pub fn payload(&self) -> [u8; RECORD_PAYLOAD_LEN] {
        let mut bytes = [0u8; RECORD_PAYLOAD_LEN];
        LittleEndian::write_u32(&mut bytes[0..4], self.sequence);
        LittleEndian::write_u32(&mut bytes[4..8], self.amount);
        bytes
    }

    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut bytes = [0u8; RECORD_LEN];
        bytes[0..RECORD_PAYLOAD_LEN].copy_from_slice(&self.payload());
        LittleEndian::write_u32(&mut bytes[8..12], self.checksum);
        bytes
    }

    /// Decodes without validating; see [`LogRecord::is_intact`].
    pub fn from_bytes(bytes: &[u8; RECORD_LEN]) -> Self {
        Self {
            sequence: LittleEndian::read_u32(&bytes[0..4]),
            amount: LittleEndian::read_u32(&bytes[4..8]),
            checksum: LittleEndian::read_u32(&bytes[8..12]),
        }
    }

    /// Recomputes the checksum over `{sequence, amount}` and compares.
    pub fn is_intact(&self) -> bool {
        crc32(&self.payload()) == self.checksum
    }
}
