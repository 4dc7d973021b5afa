// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use donation_core::storage::media::MediaError;
use donation_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Frame of {0} bytes does not fit the wire prefix")]
    FrameTooLarge(usize),

    #[error("Frame handler task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Entropy source failed its health test")]
    EntropyFailed,
}

pub type NodeResult<T> = Result<T, NodeError>;
