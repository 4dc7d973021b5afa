// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Entropy source health monitor (repetition count test).
//!
//! Driven by its own event source. Shares no state with the dispatch path.

/// Default cutoff: a run of this many identical samples fails the source.
pub const DEFAULT_REPETITION_CUTOFF: u32 = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    /// Latched. Only [`EntropyHealth::reset`] clears it.
    Failed,
}

pub struct EntropyHealth {
    cutoff: u32,
    last: Option<u8>,
    run: u32,
    samples: u64,
    status: HealthStatus,
}

impl EntropyHealth {
    pub const fn new(cutoff: u32) -> Self {
        Self {
            cutoff: if cutoff < 2 { 2 } else { cutoff },
            last: None,
            run: 0,
            samples: 0,
            status: HealthStatus::Healthy,
        }
    }

    pub fn feed(&mut self, sample: u8) -> HealthStatus {
        self.samples += 1;
        if self.last == Some(sample) {
            self.run += 1;
        } else {
            self.last = Some(sample);
            self.run = 1;
        }

        if self.run >= self.cutoff && self.status == HealthStatus::Healthy {
            tracing::error!(run = self.run, samples = self.samples, "entropy source stuck");
            self.status = HealthStatus::Failed;
        }
        self.status
    }

    pub fn feed_all(&mut self, samples: &[u8]) -> HealthStatus {
        for &s in samples {
            self.feed(s);
        }
        self.status
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.cutoff);
    }
}

impl Default for EntropyHealth {
    fn default() -> Self {
        Self::new(DEFAULT_REPETITION_CUTOFF)
    }
}
