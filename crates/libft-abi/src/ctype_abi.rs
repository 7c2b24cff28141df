//! ABI layer for character classification and case mapping.
//!
//! Pure compute: no pointers, nothing to heal. Arguments outside `0..=255`
//! classify as false and map to themselves.

use std::ffi::c_int;

use libft_core::ctype;

#[inline]
fn classify(c: c_int, f: fn(u8) -> bool) -> c_int {
    match u8::try_from(c) {
        Ok(byte) => c_int::from(f(byte)),
        Err(_) => 0,
    }
}

#[inline]
fn convert(c: c_int, f: fn(u8) -> u8) -> c_int {
    match u8::try_from(c) {
        Ok(byte) => c_int::from(f(byte)),
        Err(_) => c,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_isalpha(c: c_int) -> c_int {
    classify(c, ctype::is_alpha)
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_isdigit(c: c_int) -> c_int {
    classify(c, ctype::is_digit)
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_isalnum(c: c_int) -> c_int {
    classify(c, ctype::is_alnum)
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_isascii(c: c_int) -> c_int {
    classify(c, ctype::is_ascii)
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_isprint(c: c_int) -> c_int {
    classify(c, ctype::is_print)
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_toupper(c: c_int) -> c_int {
    convert(c, ctype::to_upper)
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_tolower(c: c_int) -> c_int {
    convert(c, ctype::to_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_matches_c_locale() {
        assert_ne!(ft_isalpha(c_int::from(b'A')), 0);
        assert_eq!(ft_isalpha(c_int::from(b'1')), 0);
        assert_ne!(ft_isdigit(c_int::from(b'9')), 0);
        assert_ne!(ft_isalnum(c_int::from(b'Z')), 0);
        assert_ne!(ft_isascii(127), 0);
        assert_eq!(ft_isascii(128), 0);
        assert_ne!(ft_isprint(c_int::from(b' ')), 0);
    }

    #[test]
    fn out_of_range_arguments() {
        assert_eq!(ft_isalpha(-1), 0);
        assert_eq!(ft_isascii(-1), 0);
        assert_eq!(ft_isprint(256 + c_int::from(b'A')), 0);
        assert_eq!(ft_toupper(-1), -1);
        assert_eq!(ft_tolower(1000), 1000);
    }

    #[test]
    fn case_mapping() {
        assert_eq!(ft_toupper(c_int::from(b'a')), c_int::from(b'A'));
        assert_eq!(ft_tolower(c_int::from(b'Z')), c_int::from(b'z'));
        assert_eq!(ft_toupper(c_int::from(b'!')), c_int::from(b'!'));
    }
}
