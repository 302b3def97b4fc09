// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # debugscope
//!
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://www.apache.org/licenses/LICENSE-2.0)
//!
//! A cross-platform decoder for the compact debug metadata that ahead-of-time
//! compilers embed into their ELF object files. Built in pure Rust, `debugscope`
//! reads the flattened address→line tables and the length-prefixed method/variable
//! debug stream without requiring the emitting toolchain or a debugger.
//!
//! ## Features
//!
//! - **📦 Efficient memory access** - Memory-mapped file access with minimal allocations
//! - **🔍 Complete debug stream decoding** - Methods, local variables, register/offset locations
//! - **📐 Address→line resolution** - Per-symbol line tables from the flattened line map
//! - **🔧 Cross-platform** - Works on Windows, Linux, macOS, and any Rust-supported platform
//! - **🛡️ Memory safe** - Bounds-checked parsing with comprehensive error handling
//!
//! ## Quick Start
//!
//! Add `debugscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! debugscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust,no_run
//! use debugscope::prelude::*;
//!
//! let object = ObjectFile::from_file("target/app.o".as_ref())?;
//! println!("Found {} symbols", object.symbols()?.len());
//! # Ok::<(), debugscope::Error>(())
//! ```
//!
//! ### Basic Usage
//!
//! ```rust,no_run
//! use debugscope::ObjectFile;
//! use std::path::Path;
//!
//! // Open an object file and decode its embedded debug data
//! let object = ObjectFile::from_file(Path::new("target/app.o"))?;
//!
//! // Resolve addresses to source lines, one symbol at a time
//! for symbol in object.symbols()? {
//!     for info in object.line_infos(&symbol)? {
//!         println!("{}: 0x{:x} -> line {}", symbol.name, info.address, info.line_number);
//!     }
//! }
//!
//! // Decode the method/variable debug stream
//! if let Some(debug_info) = object.debug_info()? {
//!     for method in &debug_info.methods {
//!         println!("{} ({} variables)", method.name, method.variables.len());
//!     }
//! }
//!
//! // Release the mapping when done; later queries fail with Error::Disposed
//! object.dispose();
//! # Ok::<(), debugscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `debugscope` is organized into two layers:
//!
//! - [`file`] - Raw object file access: backends, bounds-checked parsing, ELF
//!   symbol/section enumeration and extraction of the raw debug byte material
//! - [`debuginfo`] - Typed decoding of that material and the [`ObjectFile`] facade
//!   with its disposal lifecycle
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Debug Data Layout
//!
//! The emitter stores its output in two dedicated ELF sections:
//!
//! - `.debug_methods` - a strictly sequential little-endian stream of method records,
//!   each with its local variables, terminated by zero-length sentinels
//! - `.debug_linemap` - a flat array of `(u64 address, u64 line)` pairs covering the
//!   whole object, filtered per symbol on demand
//!
//! Objects without these sections are perfectly valid; the decoders report the
//! absence rather than erroring.
//!
//! ### Decoding Without a File
//!
//! Both decoders are pure functions and usable standalone:
//!
//! ```rust
//! use debugscope::debuginfo::{decode_debug_stream, decode_line_table};
//!
//! // A stream containing nothing but the end-of-methods marker
//! let info = decode_debug_stream(&[0, 0, 0, 0])?.unwrap();
//! assert!(info.methods.is_empty());
//!
//! let lines = decode_line_table(&[0x1000, 42], 1)?;
//! assert_eq!(lines[0].line_number, 42);
//! # Ok::<(), debugscope::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with detailed error information:
//!
//! ```rust,no_run
//! use debugscope::{Error, ObjectFile};
//!
//! match ObjectFile::from_file(std::path::Path::new("target/app.o")) {
//!     Ok(object) => println!("Successfully opened object file"),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed file: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the debugscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust,no_run
/// use debugscope::prelude::*;
///
/// // Now you have access to the most common types
/// let object = ObjectFile::from_file("target/app.o".as_ref())?;
/// let symbols = object.symbols()?;
/// # Ok::<(), debugscope::Error>(())
/// ```
pub mod prelude;

/// Object file access: backends, parsing infrastructure and raw debug material.
///
/// This module opens ELF relocatable object files and exposes the raw bytes the
/// debug decoders consume. It includes:
///
/// - **Backend abstraction**: [`file::Backend`] over memory-mapped files and owned buffers
/// - **Parsing infrastructure**: [`Parser`] and [`file::io`] for bounds-checked reads
/// - **Object structure**: [`Symbol`] and [`Section`] enumeration via goblin
/// - **Debug material**: the raw method stream and the per-symbol line-table pairs
///
/// # Examples
///
/// ```rust,no_run
/// use debugscope::File;
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("target/app.o"))?;
/// println!("{} sections", file.sections().len());
/// # Ok::<(), debugscope::Error>(())
/// ```
pub mod file;

/// Typed debug information: line tables, the method/variable stream, and the facade.
///
/// This module decodes the raw material from [`file`] into structured records:
///
/// - [`debuginfo::LineInfo`] - one address→line mapping entry
/// - [`debuginfo::DebugObjectFileInfo`] - all method records with their variables
/// - [`ObjectFile`] - the lifecycle-managed facade tying it all together
///
/// # Main Functions
///
/// - [`debuginfo::decode_line_table`] - reshape flattened pairs into [`debuginfo::LineInfo`]
/// - [`debuginfo::decode_debug_stream`] - decode the sequential method/variable stream
/// - [`debuginfo::encode_debug_stream`] - the emitter-side inverse, used for testing
///
/// # Examples
///
/// ```rust
/// use debugscope::debuginfo::decode_line_table;
///
/// let infos = decode_line_table(&[0x1000, 7, 0x1004, 8], 2)?;
/// assert_eq!(infos.len(), 2);
/// # Ok::<(), debugscope::Error>(())
/// ```
pub mod debuginfo;

/// `debugscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust,no_run
/// use debugscope::{ObjectFile, Result};
///
/// fn open_object(path: &str) -> Result<ObjectFile> {
///     ObjectFile::from_file(std::path::Path::new(path))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `debugscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for file access, container parsing and debug stream decoding.
///
/// # Examples
///
/// ```rust,no_run
/// use debugscope::{Error, ObjectFile};
///
/// match ObjectFile::from_file(std::path::Path::new("target/app.o")) {
///     Ok(object) => println!("Loaded successfully"),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Main entry point for working with object files and their embedded debug data.
///
/// See [`debuginfo::objectfile::ObjectFile`] for symbol enumeration, line
/// resolution, debug stream decoding and the disposal lifecycle.
///
/// # Example
///
/// ```rust,no_run
/// use debugscope::ObjectFile;
/// let object = ObjectFile::from_file(std::path::Path::new("target/app.o"))?;
/// println!("Found {} symbols", object.symbols()?.len());
/// # Ok::<(), debugscope::Error>(())
/// ```
pub use debuginfo::objectfile::ObjectFile;

/// Provides access to low-level file and memory parsing utilities.
///
/// The [`Parser`] type is used for decoding the sequential debug stream; [`File`]
/// is the raw object file view underneath [`ObjectFile`]; [`Symbol`] and
/// [`Section`] describe the object's named regions.
///
/// # Example
///
/// ```rust
/// use debugscope::Parser;
/// let data = [0x2A, 0x00, 0x00, 0x00];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_le::<u32>()?, 42);
/// # Ok::<(), debugscope::Error>(())
/// ```
pub use file::{parser::Parser, File, Section, Symbol};
