//! Output helpers: write a character, string, line or integer to a sink.
//!
//! Generic over [`std::io::Write`] so the same code serves raw file
//! descriptors (the ABI wraps `write(2)`) and in-memory buffers. Nothing is
//! buffered here; each call issues its writes directly on the sink.

use std::io::{self, Write};

use crate::stdlib::itoa;

/// Writes a single byte.
pub fn put_char_fd<W: Write>(out: &mut W, c: u8) -> io::Result<()> {
    out.write_all(&[c])
}

/// Writes the string content of `s` (up to its NUL, if any).
pub fn put_str_fd<W: Write>(out: &mut W, s: &[u8]) -> io::Result<()> {
    let len = crate::string::strlen(s);
    out.write_all(&s[..len])
}

/// Writes the string content of `s` followed by `\n`.
pub fn put_endl_fd<W: Write>(out: &mut W, s: &[u8]) -> io::Result<()> {
    put_str_fd(out, s)?;
    put_char_fd(out, b'\n')
}

/// Writes `n` in decimal.
pub fn put_nbr_fd<W: Write>(out: &mut W, n: i32) -> io::Result<()> {
    out.write_all(itoa(n).as_bytes())
}
