// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Receiver / transmitter glue.
//!
//! The peripheral driver hands raw bytes to [`FrameBuffer::receive`], which is
//! the only place frame length bounds are enforced. Replies are staged in a
//! [`ReplyBuffer`] and drained into a [`Transmitter`].

use zeroize::Zeroize;

use crate::config::{MAX_FRAME_LEN, MAX_REPLY_LEN};
use crate::error::{CoreError, CoreResult};

/// Bounded copy of one inbound frame. Wiped on drop.
pub struct FrameBuffer {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl FrameBuffer {
    /// Copies `raw` in if `1 <= raw.len() <= MAX_FRAME_LEN`.
    pub fn receive(raw: &[u8]) -> CoreResult<Self> {
        if raw.is_empty() || raw.len() > MAX_FRAME_LEN {
            return Err(CoreError::MalformedFrame { len: raw.len() });
        }
        let mut buf = [0u8; MAX_FRAME_LEN];
        buf[..raw.len()].copy_from_slice(raw);
        Ok(Self {
            buf,
            len: raw.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Handlers scrub parts of the frame (signatures) in place.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}

/// Outbound reply staging area.
pub struct ReplyBuffer {
    buf: [u8; MAX_REPLY_LEN],
    len: usize,
}

impl ReplyBuffer {
    pub fn new() -> Self {
        Self {
            buf: [0u8; MAX_REPLY_LEN],
            len: 0,
        }
    }

    pub fn push(&mut self, bytes: &[u8]) -> CoreResult<()> {
        let end = self.len + bytes.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(CoreError::ReplyOverflow)?;
        dst.copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    /// Unused tail, for writers that fill in place. Follow with [`ReplyBuffer::commit`].
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.len..]
    }

    pub fn commit(&mut self, n: usize) -> CoreResult<()> {
        if self.len + n > MAX_REPLY_LEN {
            return Err(CoreError::ReplyOverflow);
        }
        self.len += n;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.buf.zeroize();
        self.len = 0;
    }
}

impl Default for ReplyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbound half of the peripheral driver.
pub trait Transmitter {
    type Error: core::fmt::Debug;

    fn transmit(&mut self, reply: &[u8]) -> Result<(), Self::Error>;
}
