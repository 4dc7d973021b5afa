// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Command dispatcher.
//!
//! Routing is computed as byte masks: `class == expected` AND
//! `instruction == opcode`, each an all-ones/all-zeros value from
//! [`branchless_mask`]. Only the final "run this handler" step branches, and
//! it branches on the mask, not on the raw header bytes.

use crate::config::{CoreConfig, HEADER_LEN, INS_ACKNOWLEDGE, INS_DONATE};
use crate::ct::branchless_mask;
use crate::error::{CoreError, CoreResult};
use crate::handlers::{handle_acknowledge, handle_donate};
use crate::state::wallet::Wallet;
use crate::storage::media::LogMedia;
use crate::transport::ReplyBuffer;
use crate::verifier::SignatureVerifier;

/// Route masks for one frame header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMasks {
    pub donate: u8,
    pub acknowledge: u8,
}

pub fn route_masks(class: u8, instruction: u8, expected_class: u8) -> RouteMasks {
    let class_mask = branchless_mask(class, expected_class);
    RouteMasks {
        donate: class_mask & branchless_mask(instruction, INS_DONATE),
        acknowledge: class_mask & branchless_mask(instruction, INS_ACKNOWLEDGE),
    }
}

/// Decodes `frame` and runs at most one handler.
///
/// On any error `reply` is left empty and the wallet is untouched.
pub fn dispatch<M, V>(
    wallet: &mut Wallet<M>,
    verifier: &V,
    config: &CoreConfig,
    frame: &mut [u8],
    reply: &mut ReplyBuffer,
) -> CoreResult<()>
where
    M: LogMedia,
    V: SignatureVerifier + ?Sized,
{
    reply.clear();
    if frame.len() < HEADER_LEN {
        return Err(CoreError::MalformedFrame { len: frame.len() });
    }

    let masks = route_masks(frame[0], frame[1], config.expected_class);

    let result = if masks.donate != 0 {
        handle_donate(wallet, verifier, frame, reply)
    } else if masks.acknowledge != 0 {
        handle_acknowledge(wallet, frame, config.digit_order, reply)
    } else {
        Err(CoreError::UnknownCommand)
    };

    if result.is_err() {
        reply.clear();
    }
    result
}
