//! Debug information decoding and the high-level object file facade.
//!
//! This module turns the raw bytes exposed by [`crate::file`] into typed debug
//! records and wraps everything in a lifecycle-managed facade:
//!
//! - [`lines`] - decoding of the flattened `(address, line)` pair table into
//!   [`LineInfo`] records
//! - [`stream`] - decoding (and encoding) of the length-prefixed method/variable
//!   debug stream into [`DebugObjectFileInfo`]
//! - [`objectfile`] - the [`ObjectFile`] facade composing the decoders with the
//!   file layer and an idempotent disposal lifecycle
//!
//! The decoders are pure functions over byte material and can be used standalone;
//! [`ObjectFile`] is the convenient entry point when working with whole files.

pub mod lines;
pub mod objectfile;
pub mod stream;

pub use lines::{decode_line_table, LineInfo};
pub use objectfile::ObjectFile;
pub use stream::{
    decode_debug_stream, encode_debug_stream, DebugObjectFileInfo, MethodDebugInfo,
    VariableDebugInfo,
};
