//! Low-level byte stream parser for debug metadata decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based
//! binary data parser designed for reading the length-prefixed debug method stream
//! embedded in object files. It offers bounds-checked access to binary data with
//! little-endian decoding and exact-length UTF-8 string reads.
//!
//! # Architecture
//!
//! The parser is built around a simple cursor-based model that maintains a position
//! within a byte slice:
//!
//! - **Position tracking** - Maintains current offset for sequential parsing operations
//! - **Bounds checking** - All operations validate data availability before reading
//! - **Type-safe reading** - Strongly typed methods for the widths the format uses
//!
//! # Key Components
//!
//! - [`crate::file::parser::Parser`] - Main parser struct for binary data reading
//! - [`crate::file::parser::Parser::read_le`] - Read primitive types (little-endian)
//! - [`crate::file::parser::Parser::read_string_utf8`] - Read an exact-length UTF-8 string
//! - [`crate::file::parser::Parser::pos`] - Get current position
//!
//! # Usage Examples
//!
//! ```rust
//! use debugscope::Parser;
//!
//! let data = [0x01, 0x02, 0x03, 0x04];
//! let mut parser = Parser::new(&data);
//!
//! // Read little-endian values
//! let value = parser.read_le::<u32>()?;
//! assert_eq!(value, 0x04030201);
//! # Ok::<(), debugscope::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, StreamIO},
    Result,
};

/// A cursor-based binary data parser for the debug metadata stream.
///
/// `Parser` provides a sequential interface for reading binary data in little-endian
/// format. It maintains an internal position cursor and provides bounds checking to
/// prevent buffer overruns when reading malformed or truncated data - the decoder's
/// only defense, since the stream carries no outer length or checksum.
///
/// # Examples
///
/// ```rust
/// use debugscope::Parser;
///
/// // Length-prefixed name followed by a one-byte flag
/// let data = [0x03, 0x00, 0x00, 0x00, b'f', b'o', b'o', 0x01];
/// let mut parser = Parser::new(&data);
///
/// let len = parser.read_le::<u32>()?;
/// let name = parser.read_string_utf8(len as usize)?;
/// let flags = parser.read_le::<u8>()?;
///
/// assert_eq!(name, "foo");
/// assert_eq!(flags, 1);
/// assert!(!parser.has_more_data());
/// # Ok::<(), debugscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    ///
    /// This checks if the current position is before the end of the data buffer.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Read a type `T` from the current position in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use debugscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// let value: u32 = parser.read_le()?;
    /// assert_eq!(value, 0x04030201); // Little-endian interpretation
    /// assert_eq!(parser.pos(), 4);
    /// # Ok::<(), debugscope::Error>(())
    /// ```
    pub fn read_le<T: StreamIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read an exact-length UTF-8 string from the current position.
    ///
    /// The length is a raw byte count (not a character count) and is supplied by the
    /// caller, which has already consumed the stream's length prefix. The bytes are
    /// not null-terminated.
    ///
    /// # Arguments
    /// * `length` - Number of bytes to consume and decode
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `length` exceeds the remaining data,
    /// or [`crate::Error::Malformed`] for invalid UTF-8 encoding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use debugscope::Parser;
    ///
    /// let data = [b'H', b'e', b'l', b'l', b'o', 0xFF];
    /// let mut parser = Parser::new(&data);
    ///
    /// let result = parser.read_string_utf8(5)?;
    /// assert_eq!(result, "Hello");
    /// assert_eq!(parser.pos(), 5);
    /// # Ok::<(), debugscope::Error>(())
    /// ```
    pub fn read_string_utf8(&mut self, length: usize) -> Result<String> {
        if self.position + length > self.data.len() {
            return Err(crate::Error::OutOfBounds);
        }

        let string_data = &self.data[self.position..self.position + length];
        self.position += length;

        String::from_utf8(string_data.to_vec()).map_err(|e| {
            malformed_error!(
                "Invalid UTF-8 string at offset {}-{}: {}",
                self.position - length,
                self.position,
                e.utf8_error()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn read_le_sequential() {
        let data = [0x05, 0x00, 0x00, 0x00, 0x01, 0xFE, 0x10, 0x00, 0x00, 0x00];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.read_le::<u32>().unwrap(), 5);
        assert_eq!(parser.read_le::<u8>().unwrap(), 1);
        assert_eq!(parser.read_le::<u8>().unwrap(), 0xFE);
        assert_eq!(parser.read_le::<i32>().unwrap(), 16);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn read_le_out_of_bounds() {
        let data = [0x01, 0x02];
        let mut parser = Parser::new(&data);

        assert!(matches!(parser.read_le::<u32>(), Err(Error::OutOfBounds)));
        // Position is untouched on failure
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn read_string_exact() {
        let data = b"hello world";
        let mut parser = Parser::new(data);

        assert_eq!(parser.read_string_utf8(5).unwrap(), "hello");
        assert_eq!(parser.pos(), 5);
        assert!(parser.has_more_data());
    }

    #[test]
    fn read_string_overruns_buffer() {
        let data = b"abc";
        let mut parser = Parser::new(data);

        assert!(matches!(
            parser.read_string_utf8(4),
            Err(Error::OutOfBounds)
        ));
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn read_string_invalid_utf8() {
        let data = [0xFF, 0xFE, 0xFD];
        let mut parser = Parser::new(&data);

        assert!(matches!(
            parser.read_string_utf8(3),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn empty_parser() {
        let parser = Parser::new(&[]);

        assert!(parser.is_empty());
        assert_eq!(parser.len(), 0);
        assert!(!parser.has_more_data());
    }
}
