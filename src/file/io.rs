//! Low-level byte order and safe reading utilities for object file parsing.
//!
//! This module provides endian-aware binary data reading for the debug metadata
//! formats handled by this crate. It implements safe, bounds-checked operations for
//! reading primitive types from byte buffers in little-endian order, ensuring data
//! integrity and preventing buffer overruns during analysis.
//!
//! # Architecture
//!
//! The module is built around the [`crate::file::io::StreamIO`] trait which provides
//! a unified interface for reading binary data in a type-safe manner:
//!
//! - Generic trait-based reading for the primitive widths the formats use
//! - Automatic bounds checking to prevent buffer overruns
//! - Consistent error handling through the [`crate::Result`] type
//!
//! # Key Components
//!
//! - [`crate::file::io::StreamIO`] - Trait defining little-endian decoding for primitive types
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at a specific offset with auto-advance
//!
//! ## Supported Types
//! The [`crate::file::io::StreamIO`] trait is implemented for `u8`, `u32`, `i32` and
//! `u64` - the exact field widths appearing in the debug stream grammar and the
//! flattened line map.
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use debugscope::file::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let first: u32 = read_le_at(&data, &mut offset)?;  // offset: 0 -> 4
//! let second: u32 = read_le_at(&data, &mut offset)?; // offset: 4 -> 8
//!
//! assert_eq!(first, 1);
//! assert_eq!(second, 16);
//! # Ok::<(), debugscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All reading functions return [`crate::Result<T>`] and will return
//! [`crate::Error::OutOfBounds`] if there are insufficient bytes in the buffer to
//! complete the operation.
//!
//! # Thread Safety
//!
//! All functions in this module are pure operations on caller-provided buffers and
//! are safe to call concurrently from multiple threads.

use crate::{Error::OutOfBounds, Result};

/// Trait for implementing type-specific safe binary data reading operations.
///
/// This trait provides a unified interface for reading primitive types from byte
/// slices in a safe, little-endian-aware manner. It abstracts over the conversion
/// from byte arrays to typed values for the field widths that appear in the debug
/// stream grammar and the flattened line map.
///
/// # Implementation Details
///
/// Each implementation defines a `Bytes` associated type that represents the
/// fixed-size byte array required for that particular type (e.g., `[u8; 4]` for
/// `u32`). The trait method then converts these byte arrays to the target type.
///
/// # Thread Safety
///
/// All implementations of [`StreamIO`] are thread-safe as they only work with
/// primitive types and perform pure conversion operations.
pub trait StreamIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    ///
    /// This type must be convertible from a byte slice and is used for reading
    /// binary data in little-endian format.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

// Implement StreamIO support for u8
impl StreamIO for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u8::from_le_bytes(bytes)
    }
}

// Implement StreamIO support for u32
impl StreamIO for u32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u32::from_le_bytes(bytes)
    }
}

// Implement StreamIO support for i32
impl StreamIO for i32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i32::from_le_bytes(bytes)
    }
}

// Implement StreamIO support for u64
impl StreamIO for u64 {
    type Bytes = [u8; 8];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u64::from_le_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in little-endian byte order from a data buffer.
///
/// This function reads from the beginning of the buffer and supports all types that
/// implement the [`crate::file::io::StreamIO`] trait.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
///
/// # Returns
///
/// Returns the decoded value or [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le<T: StreamIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order from a data buffer at a specific offset.
///
/// This function reads from the specified offset and automatically advances the offset
/// by the number of bytes read. Supports all types that implement the
/// [`crate::file::io::StreamIO`] trait.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (will be advanced after reading)
///
/// # Returns
///
/// Returns the decoded value or [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le_at<T: StreamIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if (type_len + *offset) > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;

    Ok(T::from_le_bytes(read))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn read_le_u8() {
        let result = read_le::<u8>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x01);
    }

    #[test]
    fn read_le_u32() {
        let result = read_le::<u32>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0403_0201);
    }

    #[test]
    fn read_le_i32() {
        let result = read_le::<i32>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0403_0201);
    }

    #[test]
    fn read_le_i32_negative() {
        let buffer = [0xF0, 0xFF, 0xFF, 0xFF];
        let result = read_le::<i32>(&buffer).unwrap();
        assert_eq!(result, -16);
    }

    #[test]
    fn read_le_u64() {
        let result = read_le::<u64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0807060504030201);
    }

    #[test]
    fn read_le_from() {
        let mut offset = 2_usize;
        let result = read_le_at::<u32>(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(result, 0x0605_0403);
        assert_eq!(offset, 6);
    }

    #[test]
    fn errors() {
        let buffer = [0xFF, 0xFF, 0xFF, 0xFF];

        let result = read_le::<u64>(&buffer);
        assert!(matches!(result, Err(OutOfBounds)));

        let mut offset = 2_usize;
        let result = read_le_at::<u32>(&buffer, &mut offset);
        assert!(matches!(result, Err(OutOfBounds)));
        assert_eq!(offset, 2);
    }
}
