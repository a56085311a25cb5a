//! Natural ordering for record identifiers
//!
//! Identifiers such as `2020CS1001` mix letters and numbers. Plain lexical
//! comparison puts `2020CS10` before `2020CS9`; natural ordering compares
//! embedded digit runs by magnitude instead.
//!
//! Rules for text keys:
//!
//! 1. Two purely numeric strings compare as integers.
//! 2. A purely numeric string sorts before any string that is not.
//! 3. Otherwise both strings are scanned left to right. Digit runs compare
//!    by length, then lexically. Any other character compares on its own.
//!    The first mismatch decides.
//! 4. If the common prefix matches, the shorter string sorts first.
//!
//! Non-text keys (integers) use their own `Ord`.

use std::cmp::Ordering;

/// A key type with a total order used to rank records
pub trait NaturalKey {
    /// Compare two keys in natural order
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

impl NaturalKey for str {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        natural_cmp(self, other)
    }
}

impl NaturalKey for String {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        natural_cmp(self, other)
    }
}

impl NaturalKey for Box<str> {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        natural_cmp(self, other)
    }
}

impl<T: NaturalKey + ?Sized> NaturalKey for &T {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        (**self).natural_cmp(*other)
    }
}

macro_rules! impl_natural_key_for_ord {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NaturalKey for $ty {
                fn natural_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_natural_key_for_ord!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Compare two strings in natural order
///
/// This is a total order: strings that compare `Equal` are identical.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => numeric_cmp(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => mixed_cmp(a.as_bytes(), b.as_bytes()),
    }
}

/// True if every character is an ASCII digit (the empty string included)
fn is_numeric(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Integer comparison of two digit strings of any length.
///
/// Leading zeros are stripped so magnitude decides; equal magnitudes with
/// different spellings ("007" vs "7") fall back to lexical order.
fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let a_digits = a.trim_start_matches('0');
    let b_digits = b.trim_start_matches('0');

    a_digits
        .len()
        .cmp(&b_digits.len())
        .then_with(|| a_digits.cmp(b_digits))
        .then_with(|| a.cmp(b))
}

// Byte-wise scanning is safe: ASCII digits never occur inside a multi-byte
// UTF-8 sequence, and byte order of UTF-8 matches code point order.
fn mixed_cmp(a: &[u8], b: &[u8]) -> Ordering {
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let a_end = digit_run_end(a, i);
            let b_end = digit_run_end(b, j);
            let (a_run, b_run) = (&a[i..a_end], &b[j..b_end]);

            let ord = a_run.len().cmp(&b_run.len()).then_with(|| a_run.cmp(b_run));
            if ord != Ordering::Equal {
                return ord;
            }

            i = a_end;
            j = b_end;
        } else {
            let ord = a[i].cmp(&b[j]);
            if ord != Ordering::Equal {
                return ord;
            }

            i += 1;
            j += 1;
        }
    }

    a.len().cmp(&b.len())
}

fn digit_run_end(s: &[u8], start: usize) -> usize {
    s[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(s.len(), |offset| start + offset)
}
