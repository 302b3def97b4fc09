//! Object file abstraction and raw debug data access.
//!
//! This module provides support for opening ELF relocatable object files and pulling
//! out the raw material the debug decoders consume: the symbol table, the section
//! list, the flattened address→line map and the embedded method/variable debug
//! stream. It abstracts over different data sources (disk files, memory buffers)
//! behind the [`crate::file::Backend`] trait.
//!
//! # Architecture
//!
//! - **File abstraction layer** - [`crate::file::File`] ties a parsed
//!   [`goblin::elf::Elf`] view to its backing buffer
//! - **Backend system** - Pluggable data sources (disk files, memory buffers)
//! - **Parsing infrastructure** - [`crate::file::parser::Parser`] and
//!   [`crate::file::io`] for bounds-checked byte access
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - Main object file abstraction
//! - [`crate::file::Backend`] - Trait for different data sources
//! - [`crate::file::Symbol`] / [`crate::file::Section`] - Named regions of the object
//!
//! ## Backend Implementations
//! - [`crate::file::physical::Physical`] - Memory-mapped file backend for disk access
//! - [`crate::file::memory::Memory`] - In-memory buffer backend
//!
//! # Debug Data Sections
//!
//! The debug emitter stores its flattened output in two dedicated sections:
//!
//! - [`METHODS_SECTION`] (`.debug_methods`) - the length-prefixed method/variable
//!   stream, decoded by [`crate::debuginfo::decode_debug_stream`]
//! - [`LINEMAP_SECTION`] (`.debug_linemap`) - a flat array of little-endian
//!   `(u64 address, u64 line)` pairs covering the whole object
//!
//! Absence of either section means the object carries no embedded debug data of
//! that kind; it is never an error.
//!
//! # Examples
//!
//! ```rust,no_run
//! use debugscope::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("app.o"))?;
//! println!("Loaded object file with {} bytes", file.len());
//!
//! for symbol in file.symbols() {
//!     println!("{} @ 0x{:x} ({} bytes)", symbol.name, symbol.address, symbol.size);
//! }
//! # Ok::<(), debugscope::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    file::io::read_le_at,
    Error::{Empty, GoblinErr},
    Result,
};
use goblin::elf::{
    section_header::{SHT_NOBITS, SHT_NULL},
    Elf,
};
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Name of the section carrying the length-prefixed method/variable debug stream.
pub const METHODS_SECTION: &str = ".debug_methods";

/// Name of the section carrying the flattened address→line pair array.
pub const LINEMAP_SECTION: &str = ".debug_linemap";

/// Byte size of one `(u64 address, u64 line)` entry in [`LINEMAP_SECTION`].
const LINEMAP_ENTRY_SIZE: usize = 16;

/// Trait abstracting the data source backing an opened object file.
///
/// Implementations provide bounds-checked access to the raw bytes; everything above
/// this trait is agnostic to whether the data lives in a memory mapping or an owned
/// buffer.
pub trait Backend: Send + Sync {
    /// Borrow `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the requested range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Borrow the complete underlying data.
    fn data(&self) -> &[u8];

    /// Total length of the underlying data in bytes.
    fn len(&self) -> usize;
}

/// A named region of an object file with an address and size.
///
/// Produced by [`File::symbols`]; identity is `(name, address)`. Symbols are plain
/// values handed to line-table queries, never owned by the decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Symbol name from the string table
    pub name: String,
    /// Symbol address (`st_value`)
    pub address: u64,
    /// Symbol size in bytes (`st_size`)
    pub size: u64,
}

/// A section of an object file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name from the section header string table
    pub name: String,
    /// Section address (`sh_addr`)
    pub address: u64,
    /// Section size in bytes (`sh_size`)
    pub size: u64,
}

/// An opened object file: a parsed ELF view tied to its backing buffer.
///
/// `File` is the raw-data side of the crate - it enumerates symbols and sections and
/// hands out the byte material for the two debug decoders, but performs no debug
/// stream parsing itself. The high-level [`crate::ObjectFile`] facade composes this
/// type with the decoders and adds the disposal lifecycle.
#[self_referencing]
pub struct File {
    /// The raw object file data backend
    data: Box<dyn Backend>,
    /// The parsed ELF view borrowing from `data`
    #[borrows(data)]
    #[not_covariant]
    elf: Elf<'this>,
}

impl File {
    /// Open an object file from disk using a memory-mapped backend.
    ///
    /// # Arguments
    /// * `file` - Path of the object file to open
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::Empty`] if it is empty, or [`crate::Error::GoblinErr`] if it
    /// is not a parseable ELF object.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Open an object file from an in-memory buffer.
    ///
    /// # Arguments
    /// * `data` - The object file bytes
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if the buffer is empty, or
    /// [`crate::Error::GoblinErr`] if it is not a parseable ELF object.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let data = data.as_ref();

            match Elf::parse(data.data()) {
                Ok(elf) => Ok(elf),
                Err(error) => Err(GoblinErr(error)),
            }
        })
    }

    /// Total size of the object file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the object file holds no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the complete raw file data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Borrow `len` bytes of raw file data starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the requested range exceeds the file.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Enumerate the named symbols of the object file.
    ///
    /// Unnamed symbol table entries (including the mandatory null entry) are skipped;
    /// order otherwise follows the symbol table.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.with_elf(|elf| {
            let mut symbols = Vec::new();
            for sym in elf.syms.iter() {
                let Some(name) = elf.strtab.get_at(sym.st_name) else {
                    continue;
                };
                if name.is_empty() {
                    continue;
                }

                symbols.push(Symbol {
                    name: name.to_string(),
                    address: sym.st_value,
                    size: sym.st_size,
                });
            }
            symbols
        })
    }

    /// Enumerate the sections of the object file, skipping the null section header.
    #[must_use]
    pub fn sections(&self) -> Vec<Section> {
        self.with_elf(|elf| {
            elf.section_headers
                .iter()
                .filter(|header| header.sh_type != SHT_NULL)
                .map(|header| Section {
                    name: elf
                        .shdr_strtab
                        .get_at(header.sh_name)
                        .unwrap_or("")
                        .to_string(),
                    address: header.sh_addr,
                    size: header.sh_size,
                })
                .collect()
        })
    }

    /// Locate a section by name and return its file-offset range, if present.
    ///
    /// `SHT_NOBITS` sections occupy no file space and are reported as absent.
    fn section_range(&self, name: &str) -> Result<Option<(usize, usize)>> {
        self.with_elf(|elf| {
            for header in &elf.section_headers {
                if elf.shdr_strtab.get_at(header.sh_name) != Some(name) {
                    continue;
                }
                if header.sh_type == SHT_NOBITS {
                    return Ok(None);
                }

                let offset = usize::try_from(header.sh_offset).map_err(|_| {
                    malformed_error!("Section offset too large: {}", header.sh_offset)
                })?;
                let size = usize::try_from(header.sh_size).map_err(|_| {
                    malformed_error!("Section size too large: {}", header.sh_size)
                })?;

                return Ok(Some((offset, size)));
            }

            Ok(None)
        })
    }

    /// Borrow the contents of the section called `name`, or `None` if the object has
    /// no such section.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the section header points past the
    /// end of the file, or [`crate::Error::Malformed`] for nonsensical header values.
    pub fn section_data(&self, name: &str) -> Result<Option<&[u8]>> {
        match self.section_range(name)? {
            Some((offset, len)) => Ok(Some(self.data_slice(offset, len)?)),
            None => Ok(None),
        }
    }

    /// Borrow the raw embedded debug method stream.
    ///
    /// Returns an empty slice when the object carries no [`METHODS_SECTION`] - the
    /// decoder maps that to "no debug data", not an error.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] or [`crate::Error::Malformed`] if the
    /// section header is inconsistent with the file.
    pub fn debug_stream(&self) -> Result<&[u8]> {
        Ok(self.section_data(METHODS_SECTION)?.unwrap_or(&[]))
    }

    /// Collect the flattened line-table pairs covering `[address, address + size)`.
    ///
    /// Reads the [`LINEMAP_SECTION`] array of little-endian `(u64 address, u64 line)`
    /// entries and returns the matching entries as a flat `pairs` vector (element
    /// `2i` is an address, element `2i + 1` the stored line value) together with the
    /// entry count. A missing section yields `(vec![], 0)`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the section size is not a multiple of
    /// the entry size.
    pub fn line_table_for(&self, address: u64, size: u64) -> Result<(Vec<u64>, u32)> {
        let Some(data) = self.section_data(LINEMAP_SECTION)? else {
            return Ok((Vec::new(), 0));
        };

        if data.len() % LINEMAP_ENTRY_SIZE != 0 {
            return Err(malformed_error!(
                "Line map section size {} is not a multiple of the {} byte entry size",
                data.len(),
                LINEMAP_ENTRY_SIZE
            ));
        }

        let range_end = address.saturating_add(size);

        let mut pairs = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let entry_address = read_le_at::<u64>(data, &mut offset)?;
            let entry_line = read_le_at::<u64>(data, &mut offset)?;

            if entry_address >= address && entry_address < range_end {
                pairs.push(entry_address);
                pairs.push(entry_line);
            }
        }

        let count = u32::try_from(pairs.len() / 2)
            .map_err(|_| malformed_error!("Line table entry count exceeds u32"))?;

        Ok((pairs, count))
    }
}
