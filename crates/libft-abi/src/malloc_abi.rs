//! ABI layer for zeroed allocation (`ft_calloc`).

use std::ffi::c_void;

use libft_core::string::calloc_size;

/// Allocates `count * size` zeroed bytes from the C allocator.
///
/// Returns null when the multiplication overflows or `malloc` fails. A zero
/// total still yields a unique, freeable pointer.
#[unsafe(no_mangle)]
pub extern "C" fn ft_calloc(count: usize, size: usize) -> *mut c_void {
    let Ok(total) = calloc_size(count, size) else {
        return std::ptr::null_mut();
    };
    let bytes = total.max(1);

    // SAFETY: plain allocation; null is checked before the write.
    let ptr = unsafe { libc::malloc(bytes) };
    if !ptr.is_null() {
        // SAFETY: `ptr` was just allocated with `bytes` bytes.
        unsafe { std::ptr::write_bytes(ptr.cast::<u8>(), 0, bytes) };
    }
    ptr
}
