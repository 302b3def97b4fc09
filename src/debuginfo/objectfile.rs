//! High-level object file facade with an explicit disposal lifecycle.
//!
//! [`ObjectFile`] composes the raw [`crate::file::File`] access layer with the two
//! debug decoders and owns the resource lifecycle: once [`ObjectFile::dispose`] is
//! called, the backing mapping is released and every subsequent query fails with
//! [`crate::Error::Disposed`]. Disposal is idempotent and safe to call from multiple
//! threads.

use std::{path::Path, sync::RwLock};

use crate::{
    debuginfo::{decode_debug_stream, decode_line_table, DebugObjectFileInfo, LineInfo},
    file::{File, Section, Symbol},
    Error, Result,
};

/// High-level view of an object file's symbols, sections and embedded debug data.
///
/// Every accessor decodes on demand from the underlying file; nothing is cached. The
/// facade holds the only reference to the backing [`File`], so [`dispose`] releasing
/// it actually unmaps the data.
///
/// # Examples
///
/// ```rust,no_run
/// use debugscope::ObjectFile;
/// use std::path::Path;
///
/// let object = ObjectFile::from_file(Path::new("app.o"))?;
///
/// for symbol in object.symbols()? {
///     for info in object.line_infos(&symbol)? {
///         println!("{} 0x{:x} -> line {}", symbol.name, info.address, info.line_number);
///     }
/// }
///
/// object.dispose();
/// assert!(object.is_disposed());
/// # Ok::<(), debugscope::Error>(())
/// ```
///
/// [`dispose`]: ObjectFile::dispose
pub struct ObjectFile {
    /// Backing file, `None` once disposed
    file: RwLock<Option<File>>,
}

impl ObjectFile {
    /// Open an object file from disk.
    ///
    /// # Arguments
    /// * `path` - Path of the object file to open
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::Empty`] if it is empty, or [`crate::Error::GoblinErr`] if it
    /// is not a parseable ELF object.
    pub fn from_file(path: &Path) -> Result<ObjectFile> {
        Ok(ObjectFile {
            file: RwLock::new(Some(File::from_file(path)?)),
        })
    }

    /// Open an object file from an in-memory buffer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if the buffer is empty, or
    /// [`crate::Error::GoblinErr`] if it is not a parseable ELF object.
    pub fn from_mem(data: Vec<u8>) -> Result<ObjectFile> {
        Ok(ObjectFile {
            file: RwLock::new(Some(File::from_mem(data)?)),
        })
    }

    /// Run `op` against the backing file, failing if the facade was disposed.
    fn with_file<T>(&self, op: impl FnOnce(&File) -> Result<T>) -> Result<T> {
        let guard = read_lock!(self.file);
        let file = guard.as_ref().ok_or(Error::Disposed)?;

        op(file)
    }

    /// Enumerate the named symbols of the object file.
    ///
    /// # Errors
    /// Returns [`crate::Error::Disposed`] if the facade was disposed.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        self.with_file(|file| Ok(file.symbols()))
    }

    /// Enumerate the sections of the object file.
    ///
    /// # Errors
    /// Returns [`crate::Error::Disposed`] if the facade was disposed.
    pub fn sections(&self) -> Result<Vec<Section>> {
        self.with_file(|file| Ok(file.sections()))
    }

    /// Decode the address→line entries covering `symbol`.
    ///
    /// The entries come back in line-map emission order; addresses may repeat. A
    /// symbol with no coverage (or an object with no line map at all) yields an
    /// empty vector.
    ///
    /// # Errors
    /// Returns [`crate::Error::Disposed`] if the facade was disposed, or
    /// [`crate::Error::Malformed`] if the line map section is corrupt.
    pub fn line_infos(&self, symbol: &Symbol) -> Result<Vec<LineInfo>> {
        self.with_file(|file| {
            let (pairs, count) = file.line_table_for(symbol.address, symbol.size)?;

            decode_line_table(&pairs, count)
        })
    }

    /// Decode the embedded method/variable debug stream.
    ///
    /// Returns `Ok(None)` when the object carries no debug stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::Disposed`] if the facade was disposed, or
    /// [`crate::Error::Malformed`] if the stream is truncated or corrupt.
    pub fn debug_info(&self) -> Result<Option<DebugObjectFileInfo>> {
        self.with_file(|file| decode_debug_stream(file.debug_stream()?))
    }

    /// Release the backing file and its mapping.
    ///
    /// Idempotent: the first call drops the [`File`], later calls are no-ops. Any
    /// query after disposal returns [`crate::Error::Disposed`].
    pub fn dispose(&self) {
        let mut guard = write_lock!(self.file);
        *guard = None;
    }

    /// Returns `true` once [`ObjectFile::dispose`] has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        read_lock!(self.file).is_none()
    }
}
