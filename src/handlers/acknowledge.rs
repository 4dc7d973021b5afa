// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! ACKNOWLEDGE: `[cla][0x40]`, one reply per recorded donation.

use crate::config::{DigitOrder, ACK_PREFIX, HEADER_LEN};
use crate::error::{CoreError, CoreResult};
use crate::fmt::write_decimal;
use crate::state::wallet::Wallet;
use crate::storage::media::LogMedia;
use crate::transport::ReplyBuffer;

pub fn handle_acknowledge<M: LogMedia>(
    wallet: &mut Wallet<M>,
    frame: &[u8],
    order: DigitOrder,
    reply: &mut ReplyBuffer,
) -> CoreResult<()> {
    // No payload: the header is the whole frame.
    if frame.len() != HEADER_LEN {
        return Err(CoreError::MalformedFrame { len: frame.len() });
    }
    if !wallet.is_pending() {
        return Err(CoreError::NothingPending);
    }

    reply.clear();
    reply.push(ACK_PREFIX)?;
    let n = write_decimal(wallet.sequence(), order, reply.spare_mut())
        .ok_or(CoreError::ReplyOverflow)?;
    reply.commit(n)?;

    wallet.clear_pending();
    Ok(())
}
