// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! TCP stand-in for the proximity transport.
//!
//! Wire format, both directions: `[len: u16 LE][bytes]`. A reply with
//! `len == 0` means the device transmitted nothing. Length bounds on inbound
//! frames are left to the core's receiver, exactly as on the device.

use std::convert::Infallible;

use donation_core::storage::media::LogMedia;
use donation_core::transport::Transmitter;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use zeroize::Zeroize;

use crate::engine::SharedCore;
use crate::errors::{NodeError, NodeResult};

/// Collects whatever the core transmits for one frame.
#[derive(Default)]
struct Outbox {
    reply: Vec<u8>,
}

impl Transmitter for Outbox {
    type Error = Infallible;

    fn transmit(&mut self, reply: &[u8]) -> Result<(), Infallible> {
        self.reply.extend_from_slice(reply);
        Ok(())
    }
}

/// Accept loop. Each connection gets its own task; frame handling is
/// serialized by the core's mutex and runs on the blocking pool.
pub async fn serve<M>(listener: TcpListener, core: SharedCore<M>) -> NodeResult<()>
where
    M: LogMedia + Send + 'static,
{
    loop {
        let (stream, peer) = listener.accept().await?;
        tracing::debug!(%peer, "reader connected");
        let core = core.clone();
        tokio::spawn(async move {
            match handle_connection(stream, core).await {
                Ok(()) => tracing::debug!(%peer, "reader disconnected"),
                Err(e) => tracing::warn!(%peer, error = %e, "connection closed with error"),
            }
        });
    }
}

async fn handle_connection<M>(mut stream: TcpStream, core: SharedCore<M>) -> NodeResult<()>
where
    M: LogMedia + Send + 'static,
{
    loop {
        let Some(mut frame) = read_frame(&mut stream).await? else {
            return Ok(());
        };

        // Media writes sync to disk; keep them off the async workers.
        let mut guard = core.clone().lock_owned().await;
        let reply = tokio::task::spawn_blocking(move || {
            let mut outbox = Outbox::default();
            guard.on_frame_received(&frame, &mut outbox);
            frame.zeroize();
            outbox.reply
        })
        .await?;

        write_frame(&mut stream, &reply).await?;
    }
}

/// `None` on a clean EOF at a frame boundary.
pub async fn read_frame(stream: &mut TcpStream) -> NodeResult<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let len = u16::from_le_bytes(len_buf) as usize;
    let mut frame = vec![0u8; len];
    stream.read_exact(&mut frame).await?;
    Ok(Some(frame))
}

pub async fn write_frame(stream: &mut TcpStream, bytes: &[u8]) -> NodeResult<()> {
    let len = u16::try_from(bytes.len()).map_err(|_| NodeError::FrameTooLarge(bytes.len()))?;
    stream.write_all(&len.to_le_bytes()).await?;
    stream.write_all(bytes).await?;
    stream.flush().await?;
    Ok(())
}
