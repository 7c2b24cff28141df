//! Numeric conversion functions (atoi, itoa).

use crate::ctype::{is_digit, is_space};
use crate::error::{AllocError, try_to_vec};

/// Longest decimal rendering of an `i32`: `-2147483648`.
pub const ITOA_MAX_LEN: usize = 11;

/// Parses a decimal integer from the start of `s`.
///
/// Skips leading C-locale whitespace, accepts one optional `+`/`-`, then
/// consumes digits until the first non-digit or NUL. Arithmetic wraps in
/// 32-bit two's complement, so out-of-range input never panics.
pub fn atoi(s: &[u8]) -> i32 {
    let mut i = 0;
    let len = s.len();

    while i < len && is_space(s[i]) {
        i += 1;
    }

    let mut negative = false;
    if i < len && (s[i] == b'-' || s[i] == b'+') {
        negative = s[i] == b'-';
        i += 1;
    }

    let mut acc: i32 = 0;
    while i < len && is_digit(s[i]) {
        acc = acc.wrapping_mul(10).wrapping_add(i32::from(s[i] - b'0'));
        i += 1;
    }

    if negative { acc.wrapping_neg() } else { acc }
}

/// Stack buffer holding the decimal form of an `i32`.
#[derive(Debug, Clone, Copy)]
pub struct ItoaBuf {
    bytes: [u8; ITOA_MAX_LEN],
    start: usize,
}

impl ItoaBuf {
    /// The rendered digits (with leading `-` for negatives), without a NUL.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[self.start..]
    }
}

/// Renders `n` in decimal without heap allocation.
///
/// Works on the unsigned magnitude, so `i32::MIN` needs no special case.
pub fn itoa(n: i32) -> ItoaBuf {
    let mut bytes = [0u8; ITOA_MAX_LEN];
    let mut start = ITOA_MAX_LEN;
    let mut magnitude = n.unsigned_abs();

    loop {
        start -= 1;
        bytes[start] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    if n < 0 {
        start -= 1;
        bytes[start] = b'-';
    }

    ItoaBuf { bytes, start }
}

/// Renders `n` in decimal into a new buffer.
pub fn itoa_owned(n: i32) -> Result<Vec<u8>, AllocError> {
    try_to_vec(itoa(n).as_bytes())
}
