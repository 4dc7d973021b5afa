// -----------------------------------------------------------------------
// Flash Configuration
// -----------------------------------------------------------------------
// On real hardware the log lives in a dedicated flash sector and these
// functions become flash-controller register sequences. For a generic
// thumbv7m target we SIMULATE the sector in RAM, keeping flash semantics:
// erased = 0xFF, programming can only clear bits, every write is verified.

use donation_core::config::{DEFAULT_LOG_SLOTS, ERASED_BYTE, RECORD_LEN};
use donation_core::storage::media::{LogMedia, MediaError, MediaResult};

const LOG_SECTOR_SIZE: usize = DEFAULT_LOG_SLOTS * RECORD_LEN;
static mut SIMULATED_FLASH: [u8; LOG_SECTOR_SIZE] = [ERASED_BYTE; LOG_SECTOR_SIZE];

/// Log media over the (simulated) flash sector. Only one instance may exist.
pub struct FlashLog {
    _private: (),
}

impl FlashLog {
    /// # Safety
    /// Caller guarantees this is the only handle to the log sector.
    pub unsafe fn take() -> Self {
        Self { _private: () }
    }

    fn region(slot: usize) -> MediaResult<core::ops::Range<usize>> {
        if slot >= DEFAULT_LOG_SLOTS {
            return Err(MediaError::OutOfRange {
                slot,
                slots: DEFAULT_LOG_SLOTS,
            });
        }
        let start = slot * RECORD_LEN;
        Ok(start..start + RECORD_LEN)
    }

    fn erase(range: core::ops::Range<usize>) {
        unsafe {
            let ptr = core::ptr::addr_of_mut!(SIMULATED_FLASH);
            for i in range {
                core::ptr::write_volatile(&mut (*ptr)[i], ERASED_BYTE);
            }
        }
    }

    /// Word-program emulation: a cell can only go 1 -> 0.
    fn program(range: core::ops::Range<usize>, bytes: &[u8; RECORD_LEN]) {
        unsafe {
            let ptr = core::ptr::addr_of_mut!(SIMULATED_FLASH);
            for (i, &byte) in range.zip(bytes.iter()) {
                let cell = &mut (*ptr)[i];
                let current = core::ptr::read_volatile(cell);
                core::ptr::write_volatile(cell, current & byte);
            }
        }
    }

    fn read_range(range: core::ops::Range<usize>) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        unsafe {
            let ptr = core::ptr::addr_of!(SIMULATED_FLASH);
            for (dst, i) in out.iter_mut().zip(range) {
                *dst = core::ptr::read_volatile(&(*ptr)[i]);
            }
        }
        out
    }
}

impl LogMedia for FlashLog {
    fn slot_count(&self) -> usize {
        DEFAULT_LOG_SLOTS
    }

    fn write(&mut self, slot: usize, bytes: &[u8; RECORD_LEN]) -> MediaResult<()> {
        let range = Self::region(slot)?;
        Self::erase(range.clone());
        Self::program(range.clone(), bytes);

        // Read back: confirmation is what lets the log commit the counter.
        if &Self::read_range(range) != bytes {
            return Err(MediaError::VerifyFailed(slot));
        }
        Ok(())
    }

    fn read(&self, slot: usize) -> MediaResult<[u8; RECORD_LEN]> {
        Ok(Self::read_range(Self::region(slot)?))
    }
}
