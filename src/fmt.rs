// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Decimal rendering without `core::fmt`.

use crate::config::{DigitOrder, MAX_DECIMAL_DIGITS};

/// Writes the decimal digits of `value` into `out` and returns the count.
///
/// Digits are produced by repeated division by ten, least significant first,
/// then emitted in `order`. Returns `None` if `out` is too small.
pub fn write_decimal(value: u32, order: DigitOrder, out: &mut [u8]) -> Option<usize> {
    let mut scratch = [0u8; MAX_DECIMAL_DIGITS];
    let mut n = 0;
    let mut v = value;
    loop {
        scratch[n] = b'0' + (v % 10) as u8;
        n += 1;
        v /= 10;
        if v == 0 {
            break;
        }
    }

    let out = out.get_mut(..n)?;
    match order {
        DigitOrder::LeastSignificantFirst => out.copy_from_slice(&scratch[..n]),
        DigitOrder::MostSignificantFirst => {
            for (dst, src) in out.iter_mut().zip(scratch[..n].iter().rev()) {
                *dst = *src;
            }
        }
    }
    Some(n)
}
