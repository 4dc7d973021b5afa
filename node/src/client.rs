// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reader-side helper: the "phone" end of the simulated proximity link.

use std::net::SocketAddr;

use donation_core::config::DONATE_FRAME_LEN;
use donation_core::state::command::Command;
use tokio::net::TcpStream;

use crate::errors::{NodeError, NodeResult};
use crate::server::{read_frame, write_frame};

pub struct ReaderClient {
    stream: TcpStream,
}

impl ReaderClient {
    pub async fn connect(addr: SocketAddr) -> NodeResult<Self> {
        Ok(Self {
            stream: TcpStream::connect(addr).await?,
        })
    }

    /// Sends raw bytes and waits for the device's answer; `None` if it
    /// transmitted nothing.
    pub async fn exchange(&mut self, frame: &[u8]) -> NodeResult<Option<Vec<u8>>> {
        write_frame(&mut self.stream, frame).await?;
        let reply = read_frame(&mut self.stream).await?.ok_or_else(|| {
            NodeError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "device closed the link",
            ))
        })?;
        Ok((!reply.is_empty()).then_some(reply))
    }

    pub async fn send(&mut self, command: &Command) -> NodeResult<Option<Vec<u8>>> {
        let mut buf = [0u8; DONATE_FRAME_LEN];
        let n = command.encode(&mut buf);
        self.exchange(&buf[..n]).await
    }
}
