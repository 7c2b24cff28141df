//! String and memory operations.
//!
//! Byte-level primitives (`mem`), NUL-terminated string helpers (`str`) and
//! the single-delimiter tokenizer (`split`).

pub mod mem;
pub mod split;
pub mod str;

// Re-export commonly used functions.
pub use mem::{bzero, calloc, calloc_size, memchr, memcmp, memcpy, memmove, memmove_within, memset};
pub use split::{Split, count_tokens, split, split_tokens};
pub use str::{
    strchr, strdup, striteri, strjoin, strlcat, strlcpy, strlen, strmapi, strncmp, strnstr,
    strrchr, strtrim, substr,
};
