//! ABI layer for file-descriptor output (`ft_put*_fd`).
//!
//! Output is unbuffered: every call reaches `write(2)` before returning.
//! Write failures are swallowed, the C signatures have no way to report them.

use std::ffi::{c_char, c_int};

use libft_core::io;

use crate::util::{FdWriter, c_str_bytes};

#[unsafe(no_mangle)]
pub extern "C" fn ft_putchar_fd(c: c_char, fd: c_int) {
    let _ = io::put_char_fd(&mut FdWriter::new(fd), c as u8);
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_putstr_fd(s: *const c_char, fd: c_int) {
    return_if_null!("ft_putstr_fd", (); s);
    let _ = io::put_str_fd(&mut FdWriter::new(fd), unsafe { c_str_bytes(s) });
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_putendl_fd(s: *const c_char, fd: c_int) {
    return_if_null!("ft_putendl_fd", (); s);
    let _ = io::put_endl_fd(&mut FdWriter::new(fd), unsafe { c_str_bytes(s) });
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_putnbr_fd(n: c_int, fd: c_int) {
    let _ = io::put_nbr_fd(&mut FdWriter::new(fd), n);
}
