//! String operations: strlen, strdup, strchr, strrchr, strncmp, strnstr,
//! strlcpy, strlcat, substr, strjoin, strtrim, strmapi, striteri.
//!
//! Strings are `&[u8]` slices where a NUL byte (`0x00`) marks the logical end.
//! A slice without a NUL is treated as ending at the slice boundary.
//! Functions that return a new string hand back the content bytes only; the
//! ABI layer appends the terminator when it copies them into C memory.

use crate::error::{AllocError, try_to_vec, try_with_capacity};

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Duplicates the string content of `s` into a new buffer.
pub fn strdup(s: &[u8]) -> Result<Vec<u8>, AllocError> {
    try_to_vec(&s[..strlen(s)])
}

/// Locates the first occurrence of `c` in the NUL-terminated string `s`.
///
/// If `c` is `0`, returns the index of the terminator.
pub fn strchr(s: &[u8], c: u8) -> Option<usize> {
    let len = strlen(s);
    if c == 0 {
        return Some(len);
    }
    s[..len].iter().position(|&b| b == c)
}

/// Locates the last occurrence of `c` in the NUL-terminated string `s`.
///
/// If `c` is `0`, returns the index of the terminator.
pub fn strrchr(s: &[u8], c: u8) -> Option<usize> {
    let len = strlen(s);
    if c == 0 {
        return Some(len);
    }
    s[..len].iter().rposition(|&b| b == c)
}

/// Compares at most `n` bytes of two NUL-terminated byte strings.
///
/// Stops early at a terminator in either string. Returns the signed
/// difference of the first differing pair (as unsigned bytes), or zero.
pub fn strncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let a = s1.get(i).copied().unwrap_or(0);
        let b = s2.get(i).copied().unwrap_or(0);

        if a != b {
            return i32::from(a) - i32::from(b);
        }
        if a == 0 {
            return 0;
        }
    }
    0
}

/// Finds `needle` within the first `n` bytes of `haystack`.
///
/// The whole needle must fit inside the bound. An empty needle matches at
/// index 0.
pub fn strnstr(haystack: &[u8], needle: &[u8], n: usize) -> Option<usize> {
    let n_len = strlen(needle);
    if n_len == 0 {
        return Some(0);
    }
    let h_len = strlen(haystack).min(n);
    if n_len > h_len {
        return None;
    }

    let needle = &needle[..n_len];
    haystack[..h_len]
        .windows(n_len)
        .position(|window| window == needle)
}

/// Copies `src` into `dst`, truncating to `dst.len() - 1` bytes.
///
/// The destination is always NUL-terminated unless it is empty. Returns the
/// full length of `src`, so `result >= dst.len()` means truncation happened.
pub fn strlcpy(dst: &mut [u8], src: &[u8]) -> usize {
    let src_len = strlen(src);
    if let Some(room) = dst.len().checked_sub(1) {
        let n = src_len.min(room);
        dst[..n].copy_from_slice(&src[..n]);
        dst[n] = 0;
    }
    src_len
}

/// Appends `src` to the NUL-terminated string in `dst` (capacity `dst.len()`).
///
/// Returns the length the concatenation would have had. When `dst` holds no
/// terminator within its capacity nothing is written and the result is
/// `dst.len() + strlen(src)`.
pub fn strlcat(dst: &mut [u8], src: &[u8]) -> usize {
    let size = dst.len();
    let dst_len = strlen(dst);
    let src_len = strlen(src);
    if dst_len >= size {
        return size + src_len;
    }

    let n = src_len.min(size - dst_len - 1);
    dst[dst_len..dst_len + n].copy_from_slice(&src[..n]);
    dst[dst_len + n] = 0;
    dst_len + src_len
}

/// Returns the substring of `s` starting at `start` of at most `len` bytes.
///
/// `start` is clamped to the string length, so an out-of-range start yields
/// an empty slice.
pub fn substr(s: &[u8], start: usize, len: usize) -> &[u8] {
    let s_len = strlen(s);
    let start = start.min(s_len);
    let end = start + len.min(s_len - start);
    &s[start..end]
}

/// Concatenates two strings into a new buffer.
pub fn strjoin(s1: &[u8], s2: &[u8]) -> Result<Vec<u8>, AllocError> {
    let a = &s1[..strlen(s1)];
    let b = &s2[..strlen(s2)];
    let mut joined = try_with_capacity(a.len() + b.len())?;
    joined.extend_from_slice(a);
    joined.extend_from_slice(b);
    Ok(joined)
}

/// Strips leading and trailing bytes that appear in `set`.
///
/// An empty `set` leaves `s` unchanged; a string made only of `set` bytes
/// trims to an empty slice.
pub fn strtrim<'a>(s: &'a [u8], set: &[u8]) -> &'a [u8] {
    let s = &s[..strlen(s)];
    let set = &set[..strlen(set)];

    let start = s.iter().position(|b| !set.contains(b)).unwrap_or(s.len());
    let end = s[start..]
        .iter()
        .rposition(|b| !set.contains(b))
        .map_or(start, |i| start + i + 1);
    &s[start..end]
}

/// Builds a new string by applying `f(index, byte)` to every byte of `s`.
pub fn strmapi<F>(s: &[u8], mut f: F) -> Result<Vec<u8>, AllocError>
where
    F: FnMut(u32, u8) -> u8,
{
    let s = &s[..strlen(s)];
    let mut mapped = try_with_capacity(s.len())?;
    // Indices wrap like the C `unsigned int` parameter.
    mapped.extend(s.iter().enumerate().map(|(i, &b)| f(i as u32, b)));
    Ok(mapped)
}

/// Calls `f(index, &mut byte)` for every byte of the string in place.
pub fn striteri<F>(s: &mut [u8], mut f: F)
where
    F: FnMut(u32, &mut u8),
{
    let len = strlen(s);
    for (i, byte) in s[..len].iter_mut().enumerate() {
        f(i as u32, byte);
    }
}
