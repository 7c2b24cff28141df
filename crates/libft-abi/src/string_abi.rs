//! ABI layer for the memory and string functions and the tokenizer.
//!
//! Each function is an `extern "C"` entry point that:
//! 1. Answers null pointer arguments with its safe default
//! 2. Views the caller's buffers as slices bounded by the declared lengths
//! 3. Delegates to `libft-core`, copying owned results into `malloc` memory

use std::ffi::{c_char, c_int, c_uint, c_void};
use std::ptr;

use libft_core::string::{self as core_string, Split};
use libft_membrane::heal::ranges_overlap;

use crate::runtime_policy;
use crate::util::{
    alloc_c_string, c_str_bytes, c_str_bytes_bounded, raw_bytes, raw_bytes_mut,
};

/// `char (*)(unsigned int, char)` callback of `ft_strmapi`.
pub type MapiFn = unsafe extern "C" fn(c_uint, c_char) -> c_char;
/// `void (*)(unsigned int, char *)` callback of `ft_striteri`.
pub type IteriFn = unsafe extern "C" fn(c_uint, *mut c_char);

/// Offset `base` by `index` bytes, keeping the caller's pointer provenance.
#[inline]
fn at<T>(base: *const T, index: usize) -> *mut c_void {
    base.cast::<u8>().wrapping_add(index).cast_mut().cast()
}

// ---------------------------------------------------------------------------
// bzero / memset
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_bzero(s: *mut c_void, n: usize) {
    if n == 0 {
        return;
    }
    return_if_null!("ft_bzero", (); s);
    core_string::bzero(unsafe { raw_bytes_mut(s.cast(), n) }, n);
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_memset(b: *mut c_void, c: c_int, len: usize) -> *mut c_void {
    if len == 0 {
        return b;
    }
    return_if_null!("ft_memset", b; b);
    // C converts the fill value to `unsigned char`.
    core_string::memset(unsafe { raw_bytes_mut(b.cast(), len) }, c as u8, len);
    b
}

// ---------------------------------------------------------------------------
// memcpy / memmove
// ---------------------------------------------------------------------------

/// Copies `n` bytes; the regions must not overlap.
///
/// In hardened mode an overlapping request is detected and served by
/// [`ft_memmove`] instead.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_memcpy(dst: *mut c_void, src: *const c_void, n: usize) -> *mut c_void {
    if n == 0 || dst.cast_const() == src {
        return dst;
    }
    return_if_null!("ft_memcpy", dst; dst, src);

    if runtime_policy::copy_needs_move("ft_memcpy", dst as usize, src as usize, n) {
        return unsafe { ft_memmove(dst, src, n) };
    }

    let (dst_bytes, src_bytes) =
        unsafe { (raw_bytes_mut(dst.cast(), n), raw_bytes(src.cast(), n)) };
    core_string::memcpy(dst_bytes, src_bytes, n);
    dst
}

/// Copies `n` bytes between possibly overlapping regions.
///
/// Overlap is detected on the address ranges: overlapping requests run
/// through a single view spanning both regions so the copy direction can be
/// chosen, disjoint requests are a plain copy.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_memmove(dst: *mut c_void, src: *const c_void, n: usize) -> *mut c_void {
    if n == 0 || dst.cast_const() == src {
        return dst;
    }
    return_if_null!("ft_memmove", dst; dst, src);

    let (d, s) = (dst as usize, src as usize);
    if ranges_overlap(d, s, n) {
        let base = if d < s { dst.cast::<u8>() } else { src.cast_mut().cast::<u8>() };
        let lo = d.min(s);
        let span = d.max(s) - lo + n;
        // SAFETY: both ranges are valid and overlap, so their union is one
        // contiguous valid region of `span` bytes starting at `base`.
        let buf = unsafe { raw_bytes_mut(base, span) };
        core_string::memmove_within(buf, s - lo, d - lo, n);
    } else {
        let (dst_bytes, src_bytes) =
            unsafe { (raw_bytes_mut(dst.cast(), n), raw_bytes(src.cast(), n)) };
        core_string::memmove(dst_bytes, src_bytes, n);
    }
    dst
}

// ---------------------------------------------------------------------------
// memchr / memcmp
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_memchr(s: *const c_void, c: c_int, n: usize) -> *mut c_void {
    if n == 0 {
        return ptr::null_mut();
    }
    return_if_null!("ft_memchr", ptr::null_mut(); s);
    let haystack = unsafe { raw_bytes(s.cast(), n) };
    match core_string::memchr(haystack, c as u8, n) {
        Some(index) => at(s, index),
        None => ptr::null_mut(),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_memcmp(s1: *const c_void, s2: *const c_void, n: usize) -> c_int {
    if n == 0 || s1 == s2 {
        return 0;
    }
    return_if_null!("ft_memcmp", 0; s1, s2);
    let (a, b) = unsafe { (raw_bytes(s1.cast(), n), raw_bytes(s2.cast(), n)) };
    core_string::memcmp(a, b, n)
}

// ---------------------------------------------------------------------------
// strlen / strdup
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strlen(s: *const c_char) -> usize {
    return_if_null!("ft_strlen", 0; s);
    unsafe { c_str_bytes(s) }.len()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strdup(s1: *const c_char) -> *mut c_char {
    return_if_null!("ft_strdup", ptr::null_mut(); s1);
    alloc_c_string(&[unsafe { c_str_bytes(s1) }])
}

// ---------------------------------------------------------------------------
// strchr / strrchr
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strchr(s: *const c_char, c: c_int) -> *mut c_char {
    return_if_null!("ft_strchr", ptr::null_mut(); s);
    match core_string::strchr(unsafe { c_str_bytes(s) }, c as u8) {
        Some(index) => at(s, index).cast(),
        None => ptr::null_mut(),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strrchr(s: *const c_char, c: c_int) -> *mut c_char {
    return_if_null!("ft_strrchr", ptr::null_mut(); s);
    match core_string::strrchr(unsafe { c_str_bytes(s) }, c as u8) {
        Some(index) => at(s, index).cast(),
        None => ptr::null_mut(),
    }
}

// ---------------------------------------------------------------------------
// strncmp / strnstr
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strncmp(s1: *const c_char, s2: *const c_char, n: usize) -> c_int {
    if n == 0 {
        return 0;
    }
    return_if_null!("ft_strncmp", 0; s1, s2);
    let (a, b) = unsafe { (c_str_bytes_bounded(s1, n), c_str_bytes_bounded(s2, n)) };
    core_string::strncmp(a, b, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strnstr(
    haystack: *const c_char,
    needle: *const c_char,
    len: usize,
) -> *mut c_char {
    return_if_null!("ft_strnstr", ptr::null_mut(); haystack, needle);
    let needle_bytes = unsafe { c_str_bytes(needle) };
    if needle_bytes.is_empty() {
        return haystack.cast_mut();
    }
    let hay = unsafe { c_str_bytes_bounded(haystack, len) };
    match core_string::strnstr(hay, needle_bytes, len) {
        Some(index) => at(haystack, index).cast(),
        None => ptr::null_mut(),
    }
}

// ---------------------------------------------------------------------------
// strlcpy / strlcat
// ---------------------------------------------------------------------------

/// Bounded copy; returns `strlen(src)` so `result >= dstsize` flags truncation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strlcpy(dst: *mut c_char, src: *const c_char, dstsize: usize) -> usize {
    return_if_null!("ft_strlcpy", 0; src);
    let src_bytes = unsafe { c_str_bytes(src) };
    if dstsize == 0 {
        return src_bytes.len();
    }
    return_if_null!("ft_strlcpy", src_bytes.len(); dst);
    core_string::strlcpy(unsafe { raw_bytes_mut(dst.cast(), dstsize) }, src_bytes)
}

/// Bounded append; returns the length the result would have had.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strlcat(dst: *mut c_char, src: *const c_char, dstsize: usize) -> usize {
    return_if_null!("ft_strlcat", 0; src);
    let src_bytes = unsafe { c_str_bytes(src) };
    if dstsize == 0 {
        return src_bytes.len();
    }
    return_if_null!("ft_strlcat", dstsize.saturating_add(src_bytes.len()); dst);
    core_string::strlcat(unsafe { raw_bytes_mut(dst.cast(), dstsize) }, src_bytes)
}

// ---------------------------------------------------------------------------
// substr / strjoin / strtrim
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_substr(s: *const c_char, start: c_uint, len: usize) -> *mut c_char {
    return_if_null!("ft_substr", ptr::null_mut(); s);
    let bytes = unsafe { c_str_bytes(s) };
    alloc_c_string(&[core_string::substr(bytes, start as usize, len)])
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strjoin(s1: *const c_char, s2: *const c_char) -> *mut c_char {
    return_if_null!("ft_strjoin", ptr::null_mut(); s1, s2);
    let (prefix, suffix) = unsafe { (c_str_bytes(s1), c_str_bytes(s2)) };
    alloc_c_string(&[prefix, suffix])
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strtrim(s1: *const c_char, set: *const c_char) -> *mut c_char {
    return_if_null!("ft_strtrim", ptr::null_mut(); s1, set);
    let (bytes, set_bytes) = unsafe { (c_str_bytes(s1), c_str_bytes(set)) };
    alloc_c_string(&[core_string::strtrim(bytes, set_bytes)])
}

// ---------------------------------------------------------------------------
// split
// ---------------------------------------------------------------------------

/// Release a partially built `ft_split` result: the first `filled` tokens and
/// the array itself.
unsafe fn free_tokens(tokens: *mut *mut c_char, filled: usize) {
    for i in 0..filled {
        // SAFETY: slots below `filled` hold tokens allocated by this module.
        unsafe { libc::free((*tokens.add(i)).cast()) };
    }
    unsafe { libc::free(tokens.cast()) };
}

/// Splits `s` on `c` into a NULL-terminated array of new strings.
///
/// Empty tokens are never produced. If any allocation fails everything built
/// so far is released and null is returned.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_split(s: *const c_char, c: c_char) -> *mut *mut c_char {
    return_if_null!("ft_split", ptr::null_mut(); s);
    let bytes = unsafe { c_str_bytes(s) };
    let delim = c as u8;
    let count = core_string::count_tokens(bytes, delim);

    let Some(array_size) = (count + 1).checked_mul(std::mem::size_of::<*mut c_char>()) else {
        return ptr::null_mut();
    };
    let tokens = unsafe { libc::malloc(array_size) }.cast::<*mut c_char>();
    if tokens.is_null() {
        return tokens;
    }

    for (filled, token) in Split::new(bytes, delim).enumerate() {
        let copy = alloc_c_string(&[token]);
        if copy.is_null() {
            unsafe { free_tokens(tokens, filled) };
            return ptr::null_mut();
        }
        // SAFETY: `filled < count`, inside the array.
        unsafe { *tokens.add(filled) = copy };
    }
    // SAFETY: slot `count` is the sentinel position.
    unsafe { *tokens.add(count) = ptr::null_mut() };
    tokens
}

// ---------------------------------------------------------------------------
// strmapi / striteri
// ---------------------------------------------------------------------------

/// New string with every byte replaced by `f(index, byte)`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_strmapi(s: *const c_char, f: Option<MapiFn>) -> *mut c_char {
    let Some(f) = f else {
        runtime_policy::null_argument("ft_strmapi");
        return ptr::null_mut();
    };
    return_if_null!("ft_strmapi", ptr::null_mut(); s);
    let bytes = unsafe { c_str_bytes(s) };
    let mapped = alloc_c_string(&[bytes]);
    if mapped.is_null() {
        return mapped;
    }

    let out = unsafe { raw_bytes_mut(mapped.cast(), bytes.len()) };
    for (i, (slot, &byte)) in out.iter_mut().zip(bytes).enumerate() {
        // SAFETY: `f` is a caller-supplied C callback.
        *slot = unsafe { f(i as c_uint, byte as c_char) } as u8;
    }
    mapped
}

/// Calls `f(index, &byte)` on every byte of `s` in place.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_striteri(s: *mut c_char, f: Option<IteriFn>) {
    let Some(f) = f else {
        runtime_policy::null_argument("ft_striteri");
        return;
    };
    return_if_null!("ft_striteri", (); s);
    let len = unsafe { c_str_bytes(s) }.len();
    let bytes = unsafe { raw_bytes_mut(s.cast(), len) };
    core_string::striteri(bytes, |i, byte| {
        // SAFETY: `byte` points into the caller's string for the duration of the call.
        unsafe { f(i, ptr::from_mut(byte).cast()) }
    });
}
