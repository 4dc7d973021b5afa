// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Wallet state definition.

use crate::error::CoreResult;
use crate::storage::log::AppendLog;
use crate::storage::media::LogMedia;

/// Everything the dispatch path mutates. Owned by exactly one
/// [`DonationCore`](crate::DonationCore) and only reachable through `&mut`.
pub struct Wallet<M: LogMedia> {
    pending: bool,
    log: AppendLog<M>,
}

impl<M: LogMedia> Wallet<M> {
    pub fn new(log: AppendLog<M>) -> Self {
        Self {
            pending: false,
            log,
        }
    }

    // --- Read APIs ---

    /// One unclaimed donation is waiting for an acknowledgment read.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Current record identifier. Only the log moves it.
    pub fn sequence(&self) -> u32 {
        self.log.sequence()
    }

    pub fn log(&self) -> &AppendLog<M> {
        &self.log
    }

    /// Gives the log back, dropping any unclaimed pending signal.
    pub fn into_log(self) -> AppendLog<M> {
        self.log
    }

    // --- Write Logic ---

    /// Appends the donation; pending is raised only after the append succeeds.
    pub(crate) fn record_donation(&mut self, amount: u32) -> CoreResult<u32> {
        let sequence = self.log.append(amount)?;
        self.pending = true;
        Ok(sequence)
    }

    /// Consumes the pending signal after a reply has been composed.
    pub(crate) fn clear_pending(&mut self) {
        self.pending = false;
    }
}
