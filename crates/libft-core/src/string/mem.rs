//! Memory operations: bzero, memset, memcpy, memmove, memcmp, memchr, calloc.
//!
//! Every function takes an explicit byte count `n` and never touches more than
//! `min(n, slice lengths)` bytes.

use crate::error::{AllocError, try_with_capacity};

/// Writes `n` zero bytes at the start of `dest`.
///
/// Equivalent to `bzero`.
pub fn bzero(dest: &mut [u8], n: usize) {
    memset(dest, 0, n);
}

/// Fills the first `n` bytes of `dest` with `value`.
///
/// Returns the number of bytes actually set.
pub fn memset(dest: &mut [u8], value: u8, n: usize) -> usize {
    let count = n.min(dest.len());
    dest[..count].fill(value);
    count
}

/// Copies `n` bytes from `src` to `dest`.
///
/// Only copies `min(n, src.len(), dest.len())` bytes. Returns the number of
/// bytes actually copied.
pub fn memcpy(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    let count = n.min(dest.len()).min(src.len());
    dest[..count].copy_from_slice(&src[..count]);
    count
}

/// Copies `n` bytes from `src` to `dest`.
///
/// Two distinct Rust slices can never alias, so this is [`memcpy`]. Use
/// [`memmove_within`] to move bytes inside a single buffer.
pub fn memmove(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    memcpy(dest, src, n)
}

/// Moves `n` bytes inside `buf` from offset `src` to offset `dest`.
///
/// The ranges may overlap. When the destination starts inside the source
/// range the copy runs back to front, otherwise front to back, so every
/// source byte is read before it is overwritten.
///
/// `n` is clamped so both ranges stay inside `buf`. Returns the number of
/// bytes moved.
pub fn memmove_within(buf: &mut [u8], src: usize, dest: usize, n: usize) -> usize {
    let count = n
        .min(buf.len().saturating_sub(src))
        .min(buf.len().saturating_sub(dest));
    if count == 0 || src == dest {
        return count;
    }

    let dest_inside_src = dest > src && dest < src + count;
    if dest_inside_src {
        for i in (0..count).rev() {
            buf[dest + i] = buf[src + i];
        }
    } else {
        for i in 0..count {
            buf[dest + i] = buf[src + i];
        }
    }
    count
}

/// Compares the first `n` bytes of `a` and `b`.
///
/// Returns zero if equal, otherwise the signed difference of the first
/// differing pair (as unsigned bytes).
pub fn memcmp(a: &[u8], b: &[u8], n: usize) -> i32 {
    let count = n.min(a.len()).min(b.len());
    a[..count]
        .iter()
        .zip(&b[..count])
        .find(|(x, y)| x != y)
        .map_or(0, |(&x, &y)| i32::from(x) - i32::from(y))
}

/// Scans the first `n` bytes of `haystack` for `needle`.
///
/// Returns the index of the first occurrence, or `None`.
pub fn memchr(haystack: &[u8], needle: u8, n: usize) -> Option<usize> {
    let count = n.min(haystack.len());
    haystack[..count].iter().position(|&b| b == needle)
}

/// Total byte size of `count` elements of `size` bytes each.
pub fn calloc_size(count: usize, size: usize) -> Result<usize, AllocError> {
    count
        .checked_mul(size)
        .ok_or(AllocError::SizeOverflow { count, size })
}

/// Allocates `count * size` zeroed bytes.
pub fn calloc(count: usize, size: usize) -> Result<Vec<u8>, AllocError> {
    let total = calloc_size(count, size)?;
    let mut buf = try_with_capacity(total)?;
    buf.resize(total, 0);
    Ok(buf)
}
