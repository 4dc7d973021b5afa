#![no_std]
#![no_main]

// Donation acknowledgment firmware for a Cortex-M wallet token.
//
// Boot: measure .text -> compare with the digest baked in at build time ->
// recover the donation log from flash -> serve frames forever.
// Frames arrive through the NFC front-end (polled from SysTick) and are
// handled one at a time in thread mode. Nothing runs before the gate passes.

extern crate alloc; // tracing's no_std build links alloc

mod entropy;
mod flash;
mod indicator;
mod transport;

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use embedded_alloc::Heap;
use panic_halt as _;

use donation_core::config::{CoreConfig, DIGEST_LEN, MAX_FRAME_LEN};
use donation_core::integrity::{integrity_gate, Blake3Image, FailureIndicator};
use donation_core::storage::log::AppendLog;
use donation_core::verifier::Ed25519Verifier;
use donation_core::DonationCore;
use zeroize::Zeroize;

use crate::flash::FlashLog;
use crate::indicator::LedIndicator;
use crate::transport::NfcTransmitter;

// --- 1. Global Allocator ---
#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 4096;
static mut HEAP_MEM: [u8; HEAP_SIZE] = [0; HEAP_SIZE];

// -----------------------------------------------------------------------
// Build-time Configuration
// -----------------------------------------------------------------------
// Both values are hex strings supplied by the release build. A missing or
// malformed value leaves the device unable to boot.
const EXPECTED_DIGEST: Option<[u8; DIGEST_LEN]> =
    decode_hex(option_env!("DONATION_EXPECTED_DIGEST"));
const SIGNER_KEY: Option<[u8; 32]> = decode_hex(option_env!("DONATION_SIGNER_KEY"));

// 1 kHz tick at 8 MHz core clock
const SYST_RELOAD: u32 = 8_000 - 1;

extern "C" {
    static __stext: u8;
    static __etext: u8;
}

const fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

const fn decode_hex<const N: usize>(src: Option<&str>) -> Option<[u8; N]> {
    let bytes = match src {
        Some(s) => s.as_bytes(),
        None => return None,
    };
    if bytes.len() != N * 2 {
        return None;
    }
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        let (hi, lo) = match (nibble(bytes[2 * i]), nibble(bytes[2 * i + 1])) {
            (Some(hi), Some(lo)) => (hi, lo),
            _ => return None,
        };
        out[i] = (hi << 4) | lo;
        i += 1;
    }
    Some(out)
}

/// The executable region as linked. Constants in .rodata stay outside it,
/// so the expected digest does not feed its own measurement.
fn text_region() -> &'static [u8] {
    unsafe {
        let start = core::ptr::addr_of!(__stext);
        let end = core::ptr::addr_of!(__etext);
        core::slice::from_raw_parts(start, end as usize - start as usize)
    }
}

// --- 2. Entry Point ---
#[entry]
fn main() -> ! {
    // A. Initialize Heap
    unsafe {
        let ptr = core::ptr::addr_of_mut!(HEAP_MEM);
        HEAP.init(ptr as usize, HEAP_SIZE);
    }

    let mut led = LedIndicator;

    // B. Integrity Gate (fail closed)
    let Some(expected) = EXPECTED_DIGEST else {
        led.halt()
    };
    integrity_gate(&Blake3Image::new(text_region()), &expected, &mut led);

    // C. Verifier
    let verifier = match SIGNER_KEY.map(|key| Ed25519Verifier::from_bytes(&key)) {
        Some(Ok(v)) => v,
        _ => led.halt(),
    };

    // D. Recover the log, resume the counter
    let log = match AppendLog::recover(unsafe { FlashLog::take() }) {
        Ok(log) => log,
        Err(_) => led.halt(),
    };
    let mut core = DonationCore::new(log, verifier, CoreConfig::default());

    // E. Start the tick (receiver poll + entropy sampling)
    let Some(mut peripherals) = cortex_m::Peripherals::take() else {
        led.halt()
    };
    peripherals.SYST.set_clock_source(SystClkSource::Core);
    peripherals.SYST.set_reload(SYST_RELOAD);
    peripherals.SYST.clear_current();
    peripherals.SYST.enable_counter();
    peripherals.SYST.enable_interrupt();

    // F. Frame Loop
    let mut frame = [0u8; MAX_FRAME_LEN];
    let mut tx = NfcTransmitter;
    loop {
        match transport::take_frame(&mut frame) {
            Some(len) => {
                core.on_frame_received(&frame[..len], &mut tx);
                frame.zeroize();
            }
            None => cortex_m::asm::wfi(),
        }
    }
}

#[exception]
fn SysTick() {
    transport::poll_receiver();
    entropy::sample();
}
