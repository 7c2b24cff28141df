//! Shared internal utilities for ABI adapters.

use std::ffi::{c_char, c_int};
use std::io;

/// Scan a C string with an optional hard bound.
///
/// Returns `(len, terminated)` where:
/// - `len` is the byte length before the first NUL or before the bound.
/// - `terminated` indicates whether a NUL byte was observed.
///
/// # Safety
///
/// `ptr` must be valid to read up to the discovered length (and bound when given).
pub unsafe fn scan_c_string(ptr: *const c_char, bound: Option<usize>) -> (usize, bool) {
    match bound {
        Some(limit) => {
            for i in 0..limit {
                // SAFETY: caller provides validity for bounded read.
                if unsafe { *ptr.add(i) } == 0 {
                    return (i, true);
                }
            }
            (limit, false)
        }
        None => {
            let mut i = 0usize;
            // SAFETY: caller guarantees valid NUL-terminated string in unbounded mode.
            while unsafe { *ptr.add(i) } != 0 {
                i += 1;
            }
            (i, true)
        }
    }
}

/// Borrow the content of a NUL-terminated string (terminator excluded).
///
/// # Safety
///
/// `ptr` must be non-null and point to a NUL-terminated string that outlives `'a`.
pub unsafe fn c_str_bytes<'a>(ptr: *const c_char) -> &'a [u8] {
    let (len, _) = unsafe { scan_c_string(ptr, None) };
    // SAFETY: `len` bytes were just read successfully.
    unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) }
}

/// Borrow at most `bound` bytes of a string, stopping early at its NUL.
///
/// # Safety
///
/// `ptr` must be non-null and readable up to its NUL or `bound` bytes.
pub unsafe fn c_str_bytes_bounded<'a>(ptr: *const c_char, bound: usize) -> &'a [u8] {
    let (len, _) = unsafe { scan_c_string(ptr, Some(bound)) };
    // SAFETY: `len` bytes were just read successfully.
    unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) }
}

/// View `len` bytes at `ptr` as a slice; a zero length never touches `ptr`.
///
/// # Safety
///
/// When `len > 0`, `ptr` must be valid for reads of `len` bytes.
pub unsafe fn raw_bytes<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if len == 0 {
        return &[];
    }
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

/// Mutable variant of [`raw_bytes`].
///
/// # Safety
///
/// When `len > 0`, `ptr` must be valid for reads and writes of `len` bytes
/// and not aliased for `'a`.
pub unsafe fn raw_bytes_mut<'a>(ptr: *mut u8, len: usize) -> &'a mut [u8] {
    if len == 0 {
        return &mut [];
    }
    unsafe { std::slice::from_raw_parts_mut(ptr, len) }
}

/// Copy the concatenation of `parts` into a new NUL-terminated buffer from
/// the C allocator.
///
/// Returns null if the total size overflows or `malloc` fails. The caller
/// releases the result with `free`.
pub fn alloc_c_string(parts: &[&[u8]]) -> *mut c_char {
    let Some(total) = parts
        .iter()
        .try_fold(1usize, |acc, part| acc.checked_add(part.len()))
    else {
        return std::ptr::null_mut();
    };

    // SAFETY: plain allocation; null is handled below.
    let buf = unsafe { libc::malloc(total) }.cast::<u8>();
    if buf.is_null() {
        return buf.cast();
    }

    let mut offset = 0;
    for part in parts {
        // SAFETY: `buf` holds `total` bytes and `offset + part.len() < total`.
        unsafe { std::ptr::copy_nonoverlapping(part.as_ptr(), buf.add(offset), part.len()) };
        offset += part.len();
    }
    // SAFETY: `offset == total - 1`.
    unsafe { *buf.add(offset) = 0 };
    buf.cast()
}

/// Unbuffered [`io::Write`] over a raw file descriptor.
///
/// Every `write` is a single `write(2)` call; the descriptor is borrowed and
/// never closed.
#[derive(Debug, Clone, Copy)]
pub struct FdWriter {
    fd: c_int,
}

impl FdWriter {
    #[must_use]
    pub const fn new(fd: c_int) -> Self {
        Self { fd }
    }
}

impl io::Write for FdWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // SAFETY: `buf` is a valid slice for the duration of the call.
        let written = unsafe { libc::write(self.fd, buf.as_ptr().cast(), buf.len()) };
        if written < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(written as usize)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
