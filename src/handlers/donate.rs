// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! DONATE: `[cla][0x30][amount:4 LE][signature:64]`

use byteorder::{ByteOrder, LittleEndian};

use crate::config::{AMOUNT_LEN, DONATE_FRAME_LEN, HEADER_LEN, SIGNATURE_LEN, STATUS_OK};
use crate::error::{CoreError, CoreResult};
use crate::state::wallet::Wallet;
use crate::storage::media::LogMedia;
use crate::transport::ReplyBuffer;
use crate::verifier::{verify, SignatureVerifier};

pub fn handle_donate<M, V>(
    wallet: &mut Wallet<M>,
    verifier: &V,
    frame: &mut [u8],
    reply: &mut ReplyBuffer,
) -> CoreResult<()>
where
    M: LogMedia,
    V: SignatureVerifier + ?Sized,
{
    if frame.len() != DONATE_FRAME_LEN {
        return Err(CoreError::MalformedFrame { len: frame.len() });
    }

    let (_, body) = frame.split_at_mut(HEADER_LEN);
    let (amount_bytes, signature) = body.split_at_mut(AMOUNT_LEN);

    let mut message = [0u8; AMOUNT_LEN];
    message.copy_from_slice(amount_bytes);
    let signature: &mut [u8; SIGNATURE_LEN] = signature
        .try_into()
        .map_err(|_| CoreError::MalformedFrame { len: DONATE_FRAME_LEN })?;

    if !verify(verifier, &message, signature) {
        return Err(CoreError::VerificationRejected);
    }

    let amount = LittleEndian::read_u32(&message);
    wallet.record_donation(amount)?;

    reply.clear();
    reply.push(&STATUS_OK)
}
