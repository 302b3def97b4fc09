//! # debugscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits from the debugscope library. Import this module to get quick access to the
//! essential types for object file debug data decoding.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all debugscope operations
pub use crate::Error;

/// The result type used throughout debugscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry point for object file debug data access
pub use crate::ObjectFile;

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Object Structure
// ================================================================================================

/// Named regions of an object file
pub use crate::file::{Section, Symbol};

/// Debug section names used by the emitter
pub use crate::file::{LINEMAP_SECTION, METHODS_SECTION};

// ================================================================================================
// Decoded Debug Information
// ================================================================================================

/// Address→line mapping entries
pub use crate::debuginfo::LineInfo;

/// Method and variable debug records
pub use crate::debuginfo::{DebugObjectFileInfo, MethodDebugInfo, VariableDebugInfo};

/// Standalone decoders for the raw debug material
pub use crate::debuginfo::{decode_debug_stream, decode_line_table, encode_debug_stream};
