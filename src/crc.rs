// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! CRC-32 (reflected, poly 0xEDB88320), bit-serial.
//!
//! Corruption detection only. This is not an authenticator.

const POLY: u32 = 0xEDB8_8320;

/// Running CRC register.
#[derive(Clone, Copy, Debug)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { state: 0xFFFF_FFFF }
    }

    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state ^= u32::from(byte);
            for _ in 0..8 {
                let lsb_mask = (self.state & 1).wrapping_neg();
                self.state = (self.state >> 1) ^ (POLY & lsb_mask);
            }
        }
    }

    pub fn finalize(self) -> u32 {
        !self.state
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot checksum of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(data);
    crc.finalize()
}
