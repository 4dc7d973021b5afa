// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::crc::{crc32, Crc32};
use std::vec::Vec;

#[test]
fn test_check_value() {
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    assert_eq!(crc32(b""), 0);
}

#[test]
fn test_matches_table_driven_implementation() {
    let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    for len in [1usize, 7, 8, 12, 64, 1000] {
        let expected = crc32fast::hash(&data[..len]);
        assert_eq!(crc32(&data[..len]), expected, "len {}", len);
    }
}

#[test]
fn test_incremental_equals_one_shot() {
    let mut crc = Crc32::new();
    crc.update(b"1234");
    crc.update(b"56789");
    assert_eq!(crc.finalize(), crc32(b"123456789"));
}
