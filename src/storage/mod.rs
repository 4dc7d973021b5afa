// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-only record storage.

pub mod record;
pub mod media;
pub mod log;
