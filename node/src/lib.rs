// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Host-side simulator for the donation device: TCP stands in for the
//! proximity transport and a file stands in for flash.
pub mod config;
pub mod errors;
pub mod media;
pub mod engine;
pub mod integrity;
pub mod server;
pub mod client;
pub mod health;
pub mod telemetry;
