// -----------------------------------------------------------------------
// Failure Indicator
// -----------------------------------------------------------------------
// Drives the status LED. Once halted the device never serves another frame.

use donation_core::integrity::FailureIndicator;

const GPIO_BASE: usize = 0x4001_0C00;
const REG_ODR: *mut u32 = (GPIO_BASE + 0x0C) as *mut u32;
const LED_PIN: u32 = 1 << 13;

const BLINK_CYCLES: u32 = 400_000;
const BLINKS: u32 = 5;

pub struct LedIndicator;

impl LedIndicator {
    fn set(on: bool) {
        unsafe {
            let odr = core::ptr::read_volatile(REG_ODR);
            let next = if on { odr | LED_PIN } else { odr & !LED_PIN };
            core::ptr::write_volatile(REG_ODR, next);
        }
    }
}

impl FailureIndicator for LedIndicator {
    fn halt(&mut self) -> ! {
        cortex_m::interrupt::disable();
        for _ in 0..BLINKS {
            Self::set(true);
            cortex_m::asm::delay(BLINK_CYCLES);
            Self::set(false);
            cortex_m::asm::delay(BLINK_CYCLES);
        }
        // Solid on: fault latched until power cycle.
        Self::set(true);
        loop {
            cortex_m::asm::wfi();
        }
    }
}
