// Proximity (NFC) front-end glue.
//
// The front-end chip buffers a whole frame and raises RX_READY. The SysTick
// handler copies it into the mailbox; the main loop takes it from there and
// runs the core. The handler only ever copies at most MAX_FRAME_LEN bytes.

use core::cell::RefCell;

use cortex_m::interrupt::{self, Mutex};
use donation_core::config::MAX_FRAME_LEN;
use donation_core::transport::Transmitter;

// Register map of the front-end
const NFC_BASE: usize = 0x4000_2000;
const REG_STATUS: *mut u32 = NFC_BASE as *mut u32;
const REG_RX_LEN: *mut u32 = (NFC_BASE + 0x04) as *mut u32;
const REG_RX_FIFO: *mut u32 = (NFC_BASE + 0x08) as *mut u32;
const REG_TX_FIFO: *mut u32 = (NFC_BASE + 0x0C) as *mut u32;
const REG_TX_START: *mut u32 = (NFC_BASE + 0x10) as *mut u32;

const STATUS_RX_READY: u32 = 1 << 0;
const STATUS_RX_ACK: u32 = 1 << 0;

struct Mailbox {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
    full: bool,
}

static MAILBOX: Mutex<RefCell<Mailbox>> = Mutex::new(RefCell::new(Mailbox {
    buf: [0; MAX_FRAME_LEN],
    len: 0,
    full: false,
}));

/// Called from SysTick. Copies a waiting frame into the mailbox.
///
/// Oversized frames are drained from the FIFO and forgotten; they never
/// reach the dispatcher. A frame arriving while the mailbox is still full is
/// dropped as well: the reader will retry on timeout.
pub fn poll_receiver() {
    let status = unsafe { core::ptr::read_volatile(REG_STATUS) };
    if status & STATUS_RX_READY == 0 {
        return;
    }

    let len = unsafe { core::ptr::read_volatile(REG_RX_LEN) } as usize;
    interrupt::free(|cs| {
        let mut mailbox = MAILBOX.borrow(cs).borrow_mut();
        let accept = !mailbox.full && len >= 1 && len <= MAX_FRAME_LEN;
        for i in 0..len {
            let byte = unsafe { core::ptr::read_volatile(REG_RX_FIFO) } as u8;
            if accept {
                mailbox.buf[i] = byte;
            }
        }
        if accept {
            mailbox.len = len;
            mailbox.full = true;
        }
    });

    unsafe { core::ptr::write_volatile(REG_STATUS, STATUS_RX_ACK) };
}

/// Moves the waiting frame (if any) into `out`. Returns its length.
pub fn take_frame(out: &mut [u8; MAX_FRAME_LEN]) -> Option<usize> {
    interrupt::free(|cs| {
        let mut mailbox = MAILBOX.borrow(cs).borrow_mut();
        if !mailbox.full {
            return None;
        }
        let len = mailbox.len;
        out[..len].copy_from_slice(&mailbox.buf[..len]);
        zeroize::Zeroize::zeroize(&mut mailbox.buf[..]);
        mailbox.full = false;
        Some(len)
    })
}

/// Outbound half: pushes the reply into the TX FIFO and starts transmission.
pub struct NfcTransmitter;

impl Transmitter for NfcTransmitter {
    type Error = ();

    fn transmit(&mut self, reply: &[u8]) -> Result<(), ()> {
        for &byte in reply {
            unsafe { core::ptr::write_volatile(REG_TX_FIFO, byte as u32) };
        }
        unsafe { core::ptr::write_volatile(REG_TX_START, reply.len() as u32) };
        Ok(())
    }
}
