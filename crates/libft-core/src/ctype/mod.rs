//! Character classification and case mapping.
//!
//! C locale only. Every predicate is defined over a single byte; the ABI layer
//! maps out-of-range `int` arguments before calling in here.

/// Returns `true` if `c` is an alphabetic character (`[A-Za-z]`).
#[inline]
pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

/// Returns `true` if `c` is a decimal digit (`[0-9]`).
#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Returns `true` if `c` is an alphanumeric character (`[A-Za-z0-9]`).
#[inline]
pub fn is_alnum(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

/// Returns `true` if `c` is in the 7-bit ASCII range (`0..=127`).
#[inline]
pub fn is_ascii(c: u8) -> bool {
    c.is_ascii()
}

/// Returns `true` if `c` is a printable character (including space).
#[inline]
pub fn is_print(c: u8) -> bool {
    (0x20..=0x7E).contains(&c)
}

/// Returns `true` if `c` is a whitespace character.
///
/// Whitespace: space, tab, newline, vertical tab, form feed, carriage return.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Converts `c` to uppercase if it is a lowercase letter.
#[inline]
pub fn to_upper(c: u8) -> u8 {
    if c.is_ascii_lowercase() { c - 32 } else { c }
}

/// Converts `c` to lowercase if it is an uppercase letter.
#[inline]
pub fn to_lower(c: u8) -> u8 {
    if c.is_ascii_uppercase() { c + 32 } else { c }
}
