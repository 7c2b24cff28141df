//! Numeric conversion between decimal text and `i32`.

pub mod conversion;

pub use conversion::{ItoaBuf, atoi, itoa, itoa_owned};
