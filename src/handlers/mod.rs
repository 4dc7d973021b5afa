// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Instruction handlers.
//!
//! Each handler checks every precondition before touching state, so a
//! rejected request leaves nothing half-done.

pub mod donate;
pub mod acknowledge;

pub use acknowledge::handle_acknowledge;
pub use donate::handle_donate;
