//! ABI layer for numeric conversion (`ft_atoi`, `ft_itoa`).

use std::ffi::{c_char, c_int};

use libft_core::stdlib;

use crate::util::{alloc_c_string, c_str_bytes};

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_atoi(nptr: *const c_char) -> c_int {
    return_if_null!("ft_atoi", 0; nptr);
    stdlib::atoi(unsafe { c_str_bytes(nptr) })
}

/// Decimal rendering of `n` in a new C string (caller frees).
#[unsafe(no_mangle)]
pub extern "C" fn ft_itoa(n: c_int) -> *mut c_char {
    alloc_c_string(&[stdlib::itoa(n).as_bytes()])
}
