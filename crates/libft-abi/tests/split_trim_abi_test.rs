//! `ft_strtrim` and `ft_split` against the caller-visible C contract:
//! results come from `malloc`, split arrays are NULL-terminated.

use std::ffi::{CStr, CString, c_char};

use ft::string_abi::{ft_split, ft_strtrim};

fn trim(s: &str, set: &str) -> Vec<u8> {
    let (s, set) = (CString::new(s).unwrap(), CString::new(set).unwrap());
    let p = unsafe { ft_strtrim(s.as_ptr(), set.as_ptr()) };
    assert!(!p.is_null());
    // SAFETY: `p` is a fresh NUL-terminated allocation.
    let out = unsafe { CStr::from_ptr(p) }.to_bytes().to_vec();
    unsafe { libc::free(p.cast()) };
    out
}

/// Collect and free every token, then the array.
fn split(s: &str, delim: u8) -> Vec<Vec<u8>> {
    let s = CString::new(s).unwrap();
    let array = unsafe { ft_split(s.as_ptr(), delim as c_char) };
    assert!(!array.is_null());

    let mut parts = Vec::new();
    let mut i = 0;
    loop {
        // SAFETY: the array is NULL-terminated.
        let token = unsafe { *array.add(i) };
        if token.is_null() {
            break;
        }
        parts.push(unsafe { CStr::from_ptr(token) }.to_bytes().to_vec());
        unsafe { libc::free(token.cast()) };
        i += 1;
    }
    unsafe { libc::free(array.cast()) };
    parts
}

fn strs(parts: &[Vec<u8>]) -> Vec<&str> {
    parts
        .iter()
        .map(|p| std::str::from_utf8(p).unwrap())
        .collect()
}

#[test]
fn trim_cases() {
    let cases: &[(&str, &str, &str)] = &[
        ("  hello  ", " ", "hello"),
        ("xxhelloxx", "x", "hello"),
        ("hello", " ", "hello"),
        ("", " ", ""),
        ("aaaa", "a", ""),
        ("abc", "", "abc"),
        ("\t\nhello \n", " \n\t", "hello"),
        ("abca", "a", "bc"),
        ("abc", "abc", ""),
        ("--hello--", "-_", "hello"),
    ];
    for &(s, set, expected) in cases {
        assert_eq!(trim(s, set), expected.as_bytes(), "trim({s:?}, {set:?})");
    }
}

#[test]
fn trim_keeps_interior_set_bytes() {
    assert_eq!(trim("a b  c", " "), b"a b  c");
    assert_eq!(trim(" a b ", " "), b"a b");
}

#[test]
fn split_cases() {
    let cases: &[(&str, u8, &[&str])] = &[
        ("hello  world", b' ', &["hello", "world"]),
        ("  a  b c ", b' ', &["a", "b", "c"]),
        ("", b' ', &[]),
        ("one", b' ', &["one"]),
        (",,a,,b,,", b',', &["a", "b"]),
        ("a,,b", b',', &["a", "b"]),
        (",,,,", b',', &[]),
        ("a b c", b' ', &["a", "b", "c"]),
        ("  ", b' ', &[]),
        ("aba", b'a', &["b"]),
        ("x|y||z|", b'|', &["x", "y", "z"]),
    ];
    for &(s, delim, expected) in cases {
        let parts = split(s, delim);
        assert_eq!(strs(&parts), expected, "split({s:?}, {:?})", delim as char);
    }
}

#[test]
fn split_on_nul_yields_whole_string() {
    assert_eq!(strs(&split("abc def", 0)), ["abc def"]);
}

#[test]
fn split_empty_input_is_just_the_sentinel() {
    let s = CString::new("").unwrap();
    let array = unsafe { ft_split(s.as_ptr(), b' ' as c_char) };
    assert!(!array.is_null());
    assert!(unsafe { *array }.is_null());
    unsafe { libc::free(array.cast()) };
}
