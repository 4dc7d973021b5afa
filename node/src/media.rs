// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! File-backed log media.
//!
//! # File Format
//! ```text
//! [slot 0: 12 bytes][slot 1: 12 bytes]...[slot N-1: 12 bytes]
//! ```
//! No header. A fresh file is filled with 0xFF, like erased flash. Every write
//! is synced and read back before it is reported as durable.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use donation_core::config::{ERASED_BYTE, RECORD_LEN};
use donation_core::storage::media::{LogMedia, MediaError, MediaResult};

use crate::errors::{NodeError, NodeResult};

pub struct FileMedia {
    file: File,
    slots: usize,
}

impl FileMedia {
    /// Opens `path`, creating an erased store of `slots` records if it is new.
    ///
    /// An existing file must hold exactly `slots` records: the slot count is
    /// what gives wraparound its meaning.
    pub fn open(path: impl AsRef<Path>, slots: usize) -> NodeResult<Self> {
        let path = path.as_ref();
        if slots == 0 {
            return Err(NodeError::Config("log needs at least one slot".into()));
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let expected_len = (slots * RECORD_LEN) as u64;
        let len = file.metadata()?.len();
        if len == 0 {
            file.write_all(&vec![ERASED_BYTE; slots * RECORD_LEN])?;
            file.sync_all()?;
            tracing::info!(?path, slots, "initialized erased log file");
        } else if len != expected_len {
            return Err(NodeError::Config(format!(
                "log file {:?} holds {} bytes, expected {} for {} slots",
                path, len, expected_len, slots
            )));
        }

        Ok(Self { file, slots })
    }

    fn offset(&self, slot: usize) -> MediaResult<u64> {
        if slot >= self.slots {
            return Err(MediaError::OutOfRange {
                slot,
                slots: self.slots,
            });
        }
        Ok((slot * RECORD_LEN) as u64)
    }

    fn program_at(&mut self, offset: u64, bytes: &[u8; RECORD_LEN]) -> std::io::Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(bytes)?;
        self.file.sync_data()
    }

    fn read_at(&self, offset: u64) -> std::io::Result<[u8; RECORD_LEN]> {
        let mut file = &self.file;
        let mut buf = [0u8; RECORD_LEN];
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl LogMedia for FileMedia {
    fn slot_count(&self) -> usize {
        self.slots
    }

    fn write(&mut self, slot: usize, bytes: &[u8; RECORD_LEN]) -> MediaResult<()> {
        let offset = self.offset(slot)?;

        if let Err(e) = self.program_at(offset, bytes) {
            tracing::error!(slot, error = %e, "log write failed");
            return Err(MediaError::ProgramFailed(slot));
        }

        match self.read_at(offset) {
            Ok(readback) if &readback == bytes => Ok(()),
            Ok(_) => Err(MediaError::VerifyFailed(slot)),
            Err(e) => {
                tracing::error!(slot, error = %e, "log read-back failed");
                Err(MediaError::VerifyFailed(slot))
            }
        }
    }

    fn read(&self, slot: usize) -> MediaResult<[u8; RECORD_LEN]> {
        let offset = self.offset(slot)?;
        self.read_at(offset).map_err(|e| {
            tracing::error!(slot, error = %e, "log read failed");
            MediaError::ReadFailed(slot)
        })
    }
}
