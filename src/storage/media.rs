// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Persistent-media interface.
//!
//! The log only ever speaks in whole 12-byte slots. Erase, program, verify and
//! bad-block handling belong to the driver behind this trait.

use thiserror::Error;

use crate::config::{ERASED_BYTE, RECORD_LEN};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaError {
    #[error("slot {slot} out of range ({slots} slots)")]
    OutOfRange { slot: usize, slots: usize },

    #[error("program failed at slot {0}")]
    ProgramFailed(usize),

    #[error("read-back mismatch at slot {0}")]
    VerifyFailed(usize),

    #[error("read failed at slot {0}")]
    ReadFailed(usize),

    #[error("sequence counter exhausted")]
    CounterExhausted,
}

pub type MediaResult<T> = core::result::Result<T, MediaError>;

pub trait LogMedia {
    /// Number of 12-byte slots. Fixed for the lifetime of the media.
    fn slot_count(&self) -> usize;

    /// Durably stores `bytes` in `slot`. `Ok` means the write is confirmed.
    fn write(&mut self, slot: usize, bytes: &[u8; RECORD_LEN]) -> MediaResult<()>;

    fn read(&self, slot: usize) -> MediaResult<[u8; RECORD_LEN]>;
}

/// RAM-backed media. Starts fully erased.
pub struct RamMedia<const SLOTS: usize> {
    slots: [[u8; RECORD_LEN]; SLOTS],
}

impl<const SLOTS: usize> RamMedia<SLOTS> {
    pub fn new() -> Self {
        Self {
            slots: [[ERASED_BYTE; RECORD_LEN]; SLOTS],
        }
    }

    /// Raw slot access for fault injection and inspection.
    pub fn raw_slot_mut(&mut self, slot: usize) -> Option<&mut [u8; RECORD_LEN]> {
        self.slots.get_mut(slot)
    }

    fn check(slot: usize) -> MediaResult<()> {
        if slot >= SLOTS {
            return Err(MediaError::OutOfRange { slot, slots: SLOTS });
        }
        Ok(())
    }
}

impl<const SLOTS: usize> Default for RamMedia<SLOTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOTS: usize> LogMedia for RamMedia<SLOTS> {
    fn slot_count(&self) -> usize {
        SLOTS
    }

    fn write(&mut self, slot: usize, bytes: &[u8; RECORD_LEN]) -> MediaResult<()> {
        Self::check(slot)?;
        self.slots[slot] = *bytes;
        Ok(())
    }

    fn read(&self, slot: usize) -> MediaResult<[u8; RECORD_LEN]> {
        Self::check(slot)?;
        Ok(self.slots[slot])
    }
}

impl<M: LogMedia + ?Sized> LogMedia for &mut M {
    fn slot_count(&self) -> usize {
        (**self).slot_count()
    }

    fn write(&mut self, slot: usize, bytes: &[u8; RECORD_LEN]) -> MediaResult<()> {
        (**self).write(slot, bytes)
    }

    fn read(&self, slot: usize) -> MediaResult<[u8; RECORD_LEN]> {
        (**self).read(slot)
    }
}
