// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.
//!
//! The wire protocol has no negative acknowledgment: every variant except
//! `IntegrityMismatch` ends up as a silent drop at the dispatch boundary.

use thiserror::Error;

use crate::storage::media::MediaError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Empty, oversized, or wrong fixed length for the targeted instruction.
    #[error("Malformed frame: {len} bytes")]
    MalformedFrame { len: usize },

    /// Class or instruction matched no handler.
    #[error("Unknown command")]
    UnknownCommand,

    /// Signature engine rejected the donation.
    #[error("Signature rejected")]
    VerificationRejected,

    /// Record could not be made durable.
    #[error("Append failed: {0}")]
    AppendFailure(#[from] MediaError),

    /// Acknowledgment requested with no unclaimed donation.
    #[error("No donation pending acknowledgment")]
    NothingPending,

    /// Reply does not fit the reply buffer.
    #[error("Reply overflow")]
    ReplyOverflow,

    /// Firmware digest does not match the expected value.
    #[error("Firmware integrity mismatch")]
    IntegrityMismatch,

    /// Public key bytes could not be parsed.
    #[error("Invalid verifying key")]
    InvalidKey,
}

pub type CoreResult<T> = core::result::Result<T, CoreError>;
