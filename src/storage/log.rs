// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-only circular log.
//!
//! The log is the only owner of the sequence counter. A record lands in slot
//! `sequence % slot_count`; whatever occupied that slot before is gone.
//!
//! Ordering: the counter moves only after the media confirms the write, so a
//! failed append leaves no gap and no phantom identifier.

use crate::config::RECORD_LEN;
use crate::storage::media::{LogMedia, MediaError, MediaResult};
use crate::storage::record::{LogRecord, Sequence};

/// Per-slot tally produced by [`AppendLog::audit`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub intact: usize,
    pub corrupt: usize,
    pub erased: usize,
}

pub struct AppendLog<M: LogMedia> {
    media: M,
    sequence: Sequence,
}

impl<M: LogMedia> AppendLog<M> {
    /// Fresh log; the first append yields sequence 1.
    pub fn new(media: M) -> Self {
        Self {
            media,
            sequence: Sequence(0),
        }
    }

    /// Rebuilds the counter from whatever survived on the media.
    ///
    /// Erased slots are skipped. The counter resumes from the highest intact
    /// sequence, or higher: a slot that fails its checksum may have held a
    /// newer record, so the counter is pushed past the next sequence that
    /// slot could have carried. Skipping identifiers is allowed; handing one
    /// out twice is not.
    pub fn recover(media: M) -> MediaResult<Self> {
        let slots = media.slot_count();
        let mut highest = 0u32;
        let mut corrupt = 0usize;
        for slot in 0..slots {
            let bytes = media.read(slot)?;
            if is_erased(&bytes) {
                continue;
            }
            let record = LogRecord::from_bytes(&bytes);
            if record.is_intact() {
                highest = highest.max(record.sequence);
            } else {
                corrupt += 1;
            }
        }

        let mut resume = highest;
        if corrupt > 0 {
            for slot in 0..slots {
                let bytes = media.read(slot)?;
                if is_erased(&bytes) || LogRecord::from_bytes(&bytes).is_intact() {
                    continue;
                }
                resume = resume.max(next_in_slot(highest, slot, slots));
            }
            tracing::warn!(corrupt, highest, resume, "corrupt log slots, skipping ahead");
        }

        tracing::info!(sequence = resume, "log recovered");
        Ok(Self {
            media,
            sequence: Sequence(resume),
        })
    }

    /// Last committed sequence. `0` until the first append.
    pub fn sequence(&self) -> u32 {
        self.sequence.0
    }

    pub fn slot_count(&self) -> usize {
        self.media.slot_count()
    }

    /// Slot that holds (or held) `sequence`.
    pub fn slot_for(&self, sequence: u32) -> MediaResult<usize> {
        let slots = self.media.slot_count();
        if slots == 0 {
            return Err(MediaError::OutOfRange { slot: 0, slots });
        }
        Ok(sequence as usize % slots)
    }

    /// Records `amount` and returns its sequence.
    pub fn append(&mut self, amount: u32) -> MediaResult<u32> {
        let next = self.sequence.next().ok_or(MediaError::CounterExhausted)?;
        let record = LogRecord::new(next, amount);
        let slot = self.slot_for(next.0)?;

        self.media.write(slot, &record.to_bytes())?;
        self.sequence = next;

        tracing::info!(sequence = next.0, slot, "donation recorded");
        Ok(next.0)
    }

    /// Decodes a slot without interpreting it.
    pub fn read_slot(&self, slot: usize) -> MediaResult<LogRecord> {
        Ok(LogRecord::from_bytes(&self.media.read(slot)?))
    }

    /// The record for `sequence`, if its slot still holds it intact.
    pub fn get(&self, sequence: u32) -> Option<LogRecord> {
        if sequence == 0 || sequence > self.sequence.0 {
            return None;
        }
        let slot = self.slot_for(sequence).ok()?;
        let record = self.read_slot(slot).ok()?;
        (record.sequence == sequence && record.is_intact()).then_some(record)
    }

    /// Walks every slot and classifies it.
    pub fn audit(&self) -> MediaResult<AuditReport> {
        let mut report = AuditReport::default();
        for slot in 0..self.media.slot_count() {
            let bytes = self.media.read(slot)?;
            if is_erased(&bytes) {
                report.erased += 1;
            } else if LogRecord::from_bytes(&bytes).is_intact() {
                report.intact += 1;
            } else {
                report.corrupt += 1;
            }
        }
        Ok(report)
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn into_media(self) -> M {
        self.media
    }
}

/// Smallest sequence above `after` that maps to `slot`, saturating at
/// `u32::MAX` (which leaves the counter exhausted).
fn next_in_slot(after: u32, slot: usize, slots: usize) -> u32 {
    let (after, slot, slots) = (u64::from(after), slot as u64, slots as u64);
    let mut candidate = after - after % slots + slot;
    if candidate <= after {
        candidate += slots;
    }
    u32::try_from(candidate).unwrap_or(u32::MAX)
}

fn is_erased(bytes: &[u8; RECORD_LEN]) -> bool {
    bytes.iter().all(|&b| b == crate::config::ERASED_BYTE)
}
