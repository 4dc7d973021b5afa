// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod support;
pub mod crc_tests;
pub mod fmt_tests;
pub mod e2e_tests;
