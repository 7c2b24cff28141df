//! Allocation failure reporting.

use thiserror::Error;

/// Reason an owned buffer could not be produced.
///
/// This is the safe-Rust counterpart of a null return from an allocating C
/// function; an empty buffer is always a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("allocation of {requested} bytes failed")]
    OutOfMemory { requested: usize },
    #[error("allocation size overflows usize: {count} * {size}")]
    SizeOverflow { count: usize, size: usize },
}

/// Allocate an empty buffer with room for exactly `capacity` bytes.
pub(crate) fn try_with_capacity<T>(capacity: usize) -> Result<Vec<T>, AllocError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)
        .map_err(|_| AllocError::OutOfMemory {
            requested: capacity,
        })?;
    Ok(buf)
}

/// Copy `bytes` into a freshly allocated buffer.
pub(crate) fn try_to_vec(bytes: &[u8]) -> Result<Vec<u8>, AllocError> {
    let mut buf = try_with_capacity(bytes.len())?;
    buf.extend_from_slice(bytes);
    Ok(buf)
}
