//! # libft-core
//!
//! Safe Rust implementations of the libft utility library.
//!
//! Every function operates on byte slices (a NUL byte, when present, marks the
//! logical end of a C string) or on the owned [`list::List`] type. No `unsafe`
//! code is permitted at the crate level; the raw-pointer boundary lives in
//! `libft-abi`.

#![deny(unsafe_code)]

pub mod ctype;
pub mod error;
pub mod io;
pub mod list;
pub mod stdlib;
pub mod string;

pub use error::AllocError;
