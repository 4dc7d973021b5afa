// -----------------------------------------------------------------------
// Entropy Health (SysTick-driven)
// -----------------------------------------------------------------------
// Samples the hardware RNG on every tick. The monitor state is private to
// this module: the frame path never touches it. A stuck source is
// reported (latched) by the monitor itself.

use core::cell::RefCell;

use cortex_m::interrupt::{self, Mutex};
use donation_core::health::{EntropyHealth, DEFAULT_REPETITION_CUTOFF};

const RNG_BASE: usize = 0x5006_0800;
const REG_RNG_SR: *const u32 = (RNG_BASE + 0x04) as *const u32;
const REG_RNG_DR: *const u32 = (RNG_BASE + 0x08) as *const u32;
const SR_DATA_READY: u32 = 1 << 0;

static MONITOR: Mutex<RefCell<EntropyHealth>> =
    Mutex::new(RefCell::new(EntropyHealth::new(DEFAULT_REPETITION_CUTOFF)));

/// One health-check step. Feeds all four bytes of a fresh RNG word.
pub fn sample() {
    let ready = unsafe { core::ptr::read_volatile(REG_RNG_SR) } & SR_DATA_READY != 0;
    if !ready {
        return;
    }
    let word = unsafe { core::ptr::read_volatile(REG_RNG_DR) };
    interrupt::free(|cs| {
        MONITOR.borrow(cs).borrow_mut().feed_all(&word.to_le_bytes());
    });
}
