// Every export takes raw pointers from C callers under the C contract; per-function
// safety sections would repeat "pointers must be valid for the documented length".
#![allow(clippy::missing_safety_doc)]
//! # libft-abi
//!
//! `extern "C"` boundary layer for libft.
//!
//! This crate produces a `cdylib` (`libft.so`) exporting the `ft_*` symbols.
//! Each entry point turns its raw arguments into slices, delegates to the safe
//! implementations in `libft-core`, and copies owned results into memory from
//! the C allocator so callers release them with `free`.
//!
//! # Architecture
//!
//! ```text
//! C caller -> ft_* entry (this crate) -> null/overlap policy -> core impl -> return
//! ```
//!
//! Null pointer arguments never reach a dereference: the entry answers with
//! its safe default. In **hardened** mode (`LIBFT_MODE=hardened`) those
//! short-circuits are recorded and overlapping `ft_memcpy` calls are upgraded
//! to `ft_memmove`.

#[macro_use]
mod macros;

mod runtime_policy;

pub mod ctype_abi;
pub mod io_abi;
pub mod list_abi;
pub mod malloc_abi;
pub mod stdlib_abi;
pub mod string_abi;

pub mod util;

pub use list_abi::TList;
