// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![no_std]

//! donation-core: the decision logic of a contactless donation acknowledgment device.
//!
//! A frame arrives from the proximity transport, is routed by a constant-time
//! dispatcher, and either records a signed donation in an append-only,
//! CRC-tagged circular log or returns a one-shot acknowledgment carrying the
//! current record identifier. Nothing here touches hardware: media, signature
//! engine, digest engine, transmitter and failure indicator are all traits.

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod error;
pub mod ct;
pub mod crc;
pub mod fmt;
pub mod storage;
pub mod state;
pub mod verifier;
pub mod handlers;
pub mod dispatch;
pub mod transport;
pub mod integrity;
pub mod health;
pub mod engine;

pub use crate::engine::DonationCore;
pub use crate::error::{CoreError, CoreResult};

#[cfg(test)]
pub mod tests;
