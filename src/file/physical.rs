//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements
//! the [`crate::file::Backend`] trait for accessing object files from disk using
//! memory-mapped I/O. This provides efficient access to large files without loading
//! the entire content into memory upfront, while still allowing fast random access to
//! any part of the file.
//!
//! # Key Components
//!
//! - [`crate::file::physical::Physical`] - Main backend struct implementing [`crate::file::Backend`]
//! - [`crate::file::physical::Physical::new`] - Creates backend from file path with memory mapping
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use debugscope::file::{Physical, Backend};
//! use std::path::Path;
//!
//! let physical = Physical::new(Path::new("app.o"))?;
//! println!("File size: {} bytes", physical.len());
//!
//! // Read the ELF magic
//! let magic = physical.data_slice(0, 4)?;
//! assert_eq!(magic, b"\x7fELF");
//! # Ok::<(), debugscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! [`crate::file::physical::Physical`] is [`Send`] and [`Sync`]; the mapping is
//! read-only and never mutated after creation.

use super::Backend;
use crate::{
    Error::{Error, FileError, OutOfBounds},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// Memory-mapped file backend for reading object files from disk.
///
/// Uses [`memmap2::Mmap`] to map the file into the process's address space; pages
/// are loaded on demand by the operating system.
#[derive(Debug)]
pub struct Physical {
    /// The memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new memory-mapped backend from a file path.
    ///
    /// # Arguments
    /// * `path` - The file to map
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, or
    /// [`crate::Error::Error`] if the mapping itself fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error(error.to_string())),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn physical() {
        let mut tmp = std::env::temp_dir();
        tmp.push("debugscope_physical_test.bin");

        let payload = [0xAA_u8, 0xBB, 0xCC, 0xDD, 0xEE];
        fs::File::create(&tmp)
            .unwrap()
            .write_all(&payload)
            .unwrap();

        let physical = Physical::new(&tmp).unwrap();
        assert_eq!(physical.len(), 5);
        assert_eq!(physical.data(), &payload);
        assert_eq!(physical.data_slice(1, 3).unwrap(), &[0xBB, 0xCC, 0xDD]);
        assert!(physical.data_slice(3, 3).is_err());

        fs::remove_file(&tmp).ok();
    }

    #[test]
    fn physical_missing_file() {
        let result = Physical::new("this/path/does/not/exist.o");
        assert!(matches!(result, Err(FileError(_))));
    }
}
