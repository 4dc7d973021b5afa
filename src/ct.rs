// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Constant-time primitives.
//!
//! Nothing in this module may branch on the bytes it compares. Lengths are
//! public and may steer control flow; contents never do.

use core::hint::black_box;

/// Compares the first `len` bytes of `a` and `b`.
///
/// Returns `0` iff every byte is equal. All `len` bytes are visited even after
/// a mismatch. If either slice is shorter than `len` the result is non-zero.
pub fn constant_time_equal(a: &[u8], b: &[u8], len: usize) -> u8 {
    constant_time_equal_traced(a, b, len).0
}

/// Same as [`constant_time_equal`], also returning the number of byte steps
/// executed. The step count is a function of `len` alone.
pub fn constant_time_equal_traced(a: &[u8], b: &[u8], len: usize) -> (u8, usize) {
    let (a, b) = match (a.get(..len), b.get(..len)) {
        (Some(a), Some(b)) => (a, b),
        _ => return (0xFF, 0),
    };

    let mut diff = 0u8;
    let mut steps = 0usize;
    for (&x, &y) in a.iter().zip(b.iter()) {
        diff = black_box(diff | (x ^ y));
        steps += 1;
    }
    (diff, steps)
}

/// `0xFF` when `x == y`, `0x00` otherwise, without a conditional.
#[inline]
pub fn branchless_mask(x: u8, y: u8) -> u8 {
    let diff = u32::from(x ^ y);
    // High bit of (d | -d) is set iff d != 0.
    let nonzero = ((diff | diff.wrapping_neg()) >> 31) as u8;
    (nonzero ^ 1).wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_is_all_or_nothing() {
        for x in 0..=255u8 {
            assert_eq!(branchless_mask(x, x), 0xFF);
            assert_eq!(branchless_mask(x, x.wrapping_add(1)), 0x00);
            assert_eq!(branchless_mask(x, !x), 0x00);
        }
    }

    #[test]
    fn test_short_input_never_equal() {
        assert_ne!(constant_time_equal(b"abc", b"abcd", 4), 0);
        assert_eq!(constant_time_equal(b"abc", b"abcd", 3), 0);
    }
}
