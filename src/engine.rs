// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The event handler the platform calls once per received frame.

use crate::config::CoreConfig;
use crate::dispatch::dispatch;
use crate::error::CoreResult;
use crate::state::wallet::Wallet;
use crate::storage::log::AppendLog;
use crate::storage::media::LogMedia;
use crate::transport::{FrameBuffer, ReplyBuffer, Transmitter};
use crate::verifier::SignatureVerifier;

/// Single owner of the wallet, the log and the verifier.
///
/// `&mut self` on every entry point is the "one handler at a time" rule:
/// a platform with real parallelism has to wrap this in a mutex to call it.
pub struct DonationCore<M: LogMedia, V: SignatureVerifier> {
    wallet: Wallet<M>,
    verifier: V,
    config: CoreConfig,
    reply: ReplyBuffer,
}

impl<M: LogMedia, V: SignatureVerifier> DonationCore<M, V> {
    pub fn new(log: AppendLog<M>, verifier: V, config: CoreConfig) -> Self {
        Self {
            wallet: Wallet::new(log),
            verifier,
            config,
            reply: ReplyBuffer::new(),
        }
    }

    pub fn wallet(&self) -> &Wallet<M> {
        &self.wallet
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Bounds-checks `raw`, dispatches it, and returns the reply if one was
    /// produced. Every failure is a silent drop.
    pub fn handle_frame(&mut self, raw: &[u8]) -> Option<&[u8]> {
        match self.try_handle_frame(raw) {
            Ok(()) => Some(self.reply.as_bytes()),
            Err(e) => {
                tracing::debug!(len = raw.len(), reason = %e, "frame dropped");
                None
            }
        }
    }

    fn try_handle_frame(&mut self, raw: &[u8]) -> CoreResult<()> {
        self.reply.clear();
        let mut frame = FrameBuffer::receive(raw)?;
        dispatch(
            &mut self.wallet,
            &self.verifier,
            &self.config,
            frame.as_mut_slice(),
            &mut self.reply,
        )
    }

    /// Frame-arrival event: handle, then drain any reply into `tx`.
    ///
    /// Returns whether a reply was transmitted.
    pub fn on_frame_received<T: Transmitter>(&mut self, raw: &[u8], tx: &mut T) -> bool {
        let Some(reply) = self.handle_frame(raw) else {
            return false;
        };
        match tx.transmit(reply) {
            Ok(()) => {
                self.reply.clear();
                true
            }
            Err(e) => {
                tracing::warn!(error = ?e, "reply not transmitted");
                self.reply.clear();
                false
            }
        }
    }

    pub fn into_parts(self) -> (AppendLog<M>, V) {
        let Self { wallet, verifier, .. } = self;
        (wallet.into_log(), verifier)
    }
}
