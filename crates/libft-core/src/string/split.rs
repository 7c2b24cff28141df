//! Single-delimiter tokenizer.
//!
//! Splits a NUL-terminated byte string on one delimiter byte. Empty runs
//! (leading, trailing or between consecutive delimiters) are never emitted.

use crate::error::{AllocError, try_to_vec, try_with_capacity};
use crate::string::str::strlen;

/// Iterator over the non-empty tokens of a byte string.
///
/// Yields borrowed subslices in left-to-right order.
#[derive(Debug, Clone)]
pub struct Split<'a> {
    rest: &'a [u8],
    delim: u8,
}

impl<'a> Split<'a> {
    #[must_use]
    pub fn new(s: &'a [u8], delim: u8) -> Self {
        Self {
            rest: &s[..strlen(s)],
            delim,
        }
    }
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.iter().position(|&b| b != self.delim)?;
        let rest = &self.rest[start..];
        let end = rest
            .iter()
            .position(|&b| b == self.delim)
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

/// Borrowing tokenizer; see [`Split`].
pub fn split_tokens(s: &[u8], delim: u8) -> Split<'_> {
    Split::new(s, delim)
}

/// Number of tokens [`split`] would produce.
pub fn count_tokens(s: &[u8], delim: u8) -> usize {
    Split::new(s, delim).count()
}

/// Splits `s` on `delim` into owned tokens.
///
/// If any allocation fails the tokens built so far are dropped and the error
/// is returned; a partial sequence is never handed back.
pub fn split(s: &[u8], delim: u8) -> Result<Vec<Vec<u8>>, AllocError> {
    let mut tokens = try_with_capacity(count_tokens(s, delim))?;
    for token in Split::new(s, delim) {
        tokens.push(try_to_vec(token)?);
    }
    Ok(tokens)
}
