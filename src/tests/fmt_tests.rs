// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::DigitOrder;
use crate::fmt::write_decimal;

fn render(value: u32, order: DigitOrder) -> std::string::String {
    let mut buf = [0u8; 10];
    let n = write_decimal(value, order, &mut buf).unwrap();
    std::string::String::from_utf8(buf[..n].to_vec()).unwrap()
}

#[test]
fn test_most_significant_first() {
    assert_eq!(render(0, DigitOrder::MostSignificantFirst), "0");
    assert_eq!(render(1, DigitOrder::MostSignificantFirst), "1");
    assert_eq!(render(1204, DigitOrder::MostSignificantFirst), "1204");
    assert_eq!(render(u32::MAX, DigitOrder::MostSignificantFirst), "4294967295");
}

#[test]
fn test_least_significant_first_keeps_generation_order() {
    assert_eq!(render(7, DigitOrder::LeastSignificantFirst), "7");
    assert_eq!(render(12, DigitOrder::LeastSignificantFirst), "21");
    assert_eq!(render(1200, DigitOrder::LeastSignificantFirst), "0021");
}

#[test]
fn test_short_buffer_is_refused() {
    let mut buf = [0u8; 2];
    assert_eq!(write_decimal(123, DigitOrder::MostSignificantFirst, &mut buf), None);
    assert_eq!(write_decimal(12, DigitOrder::MostSignificantFirst, &mut buf), Some(2));
}
