//! Decoding of the embedded method/variable debug stream.
//!
//! The debug emitter serializes one record per method, each carrying the method's
//! local variables, into a strictly sequential little-endian stream with no outer
//! length, count or checksum:
//!
//! ```text
//! Stream      := Method* EndMarker
//! Method      := StrLen Name Variable* EndMarker
//! Variable    := StrLen Name Flags Reg Offset
//! StrLen      := u32          ; 0 where a Method/Variable is expected = end of list
//! Name        := StrLen raw UTF-8 bytes (not null-terminated)
//! Flags       := u8           ; bit 0 = register-relative; other bits are reserved
//! Reg         := u8           ; unsigned reinterpretation of a signed source byte
//! Offset      := i32
//! ```
//!
//! Because every record's extent is implied solely by its string length prefix and
//! fixed trailing fields, the stream has no resynchronization points: a single bad
//! record misaligns every read after it. [`decode_debug_stream`] therefore aborts
//! the whole decode on any malformed input instead of skipping forward, and every
//! error carries the byte offset where decoding stopped.

use crate::{file::parser::Parser, Result};

/// Flags bit marking a variable's location as register-relative.
const FLAG_REGISTER_RELATIVE: u8 = 0x01;

/// Storage location of one local variable as recorded by the debug emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDebugInfo {
    /// Variable name
    pub name: String,
    /// `true` if the location is relative to a register, `false` for an absolute slot
    pub is_register_relative: bool,
    /// Register index. The source stream stores this in a signed byte, but the valid
    /// domain is 0-255, so the raw byte is reinterpreted unsigned rather than
    /// sign-extended.
    pub register: u8,
    /// Offset from the register or slot base
    pub offset: i32,
}

/// Debug information for one method: its name and local variables in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDebugInfo {
    /// Method name
    pub name: String,
    /// Local variables in declaration (stream) order, not guaranteed sorted
    pub variables: Vec<VariableDebugInfo>,
}

/// Root result of decoding an object file's embedded debug stream.
///
/// Distinct from "no debug data at all": an object whose stream is empty has no
/// `DebugObjectFileInfo`, while a non-empty stream that opens with the end-of-methods
/// sentinel decodes to an instance with zero methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugObjectFileInfo {
    /// Methods in stream order
    pub methods: Vec<MethodDebugInfo>,
}

impl DebugObjectFileInfo {
    /// Look up a method's debug record by name.
    #[must_use]
    pub fn method_by_name(&self, name: &str) -> Option<&MethodDebugInfo> {
        self.methods.iter().find(|method| method.name == name)
    }
}

/// Decode an embedded debug stream into structured method records.
///
/// An empty input yields `Ok(None)` - the object file simply carries no embedded
/// debug data. A non-empty stream is decoded strictly and sequentially: method
/// records until the zero-length method sentinel, each method's variables until its
/// own zero-length variable sentinel.
///
/// The decode is all-or-nothing. Any malformation - a length prefix overrunning the
/// buffer, a missing fixed field, invalid UTF-8 in a name, or end-of-buffer before a
/// terminating sentinel - aborts the whole call with [`crate::Error::Malformed`]
/// carrying the byte offset. Partial results are never returned; skipping a bad
/// record would misalign every subsequent read. A stream that ends before its final
/// method-list sentinel is rejected rather than silently accepted, and any bytes
/// following that sentinel are ignored.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for any truncated or corrupt stream.
///
/// # Examples
///
/// ```rust
/// use debugscope::debuginfo::decode_debug_stream;
///
/// // One method "hi" with no variables, then the end-of-methods sentinel
/// let stream = [
///     0x02, 0x00, 0x00, 0x00, b'h', b'i', // method name
///     0x00, 0x00, 0x00, 0x00,             // end of variables
///     0x00, 0x00, 0x00, 0x00,             // end of methods
/// ];
///
/// let info = decode_debug_stream(&stream)?.unwrap();
/// assert_eq!(info.methods.len(), 1);
/// assert_eq!(info.methods[0].name, "hi");
/// assert!(info.methods[0].variables.is_empty());
/// # Ok::<(), debugscope::Error>(())
/// ```
pub fn decode_debug_stream(data: &[u8]) -> Result<Option<DebugObjectFileInfo>> {
    if data.is_empty() {
        return Ok(None);
    }

    let mut parser = Parser::new(data);
    let mut methods = Vec::new();

    loop {
        let str_len = parser.read_le::<u32>().map_err(|_| {
            malformed_error!(
                "Debug stream truncated at offset {}: expected method name length or end marker",
                parser.pos()
            )
        })?;
        if str_len == 0 {
            // End of methods; trailing bytes beyond this point are not ours
            break;
        }

        let name = read_name(&mut parser, str_len, "method")?;
        let variables = decode_variables(&mut parser)?;

        methods.push(MethodDebugInfo { name, variables });
    }

    Ok(Some(DebugObjectFileInfo { methods }))
}

/// Decode one method's variable list up to and including its end sentinel.
fn decode_variables(parser: &mut Parser<'_>) -> Result<Vec<VariableDebugInfo>> {
    let mut variables = Vec::new();

    loop {
        let str_len = parser.read_le::<u32>().map_err(|_| {
            malformed_error!(
                "Debug stream truncated at offset {}: expected variable name length or end marker",
                parser.pos()
            )
        })?;
        if str_len == 0 {
            break;
        }

        let name = read_name(parser, str_len, "variable")?;

        let flags = parser.read_le::<u8>().map_err(|_| {
            malformed_error!(
                "Debug stream truncated at offset {}: missing variable flags",
                parser.pos()
            )
        })?;
        // Reading the register as u8 is the unsigned reinterpretation of the
        // producer's signed byte; sign-extending here would corrupt indices >= 128
        let register = parser.read_le::<u8>().map_err(|_| {
            malformed_error!(
                "Debug stream truncated at offset {}: missing variable register",
                parser.pos()
            )
        })?;
        let offset = parser.read_le::<i32>().map_err(|_| {
            malformed_error!(
                "Debug stream truncated at offset {}: missing variable offset",
                parser.pos()
            )
        })?;

        variables.push(VariableDebugInfo {
            name,
            is_register_relative: (flags & FLAG_REGISTER_RELATIVE) != 0,
            register,
            offset,
        });
    }

    Ok(variables)
}

/// Read a length-prefixed UTF-8 name, converting bounds overruns into malformed
/// errors that name the record kind and offset.
fn read_name(parser: &mut Parser<'_>, str_len: u32, kind: &str) -> Result<String> {
    let start = parser.pos();
    match parser.read_string_utf8(str_len as usize) {
        Ok(name) => Ok(name),
        Err(crate::Error::OutOfBounds) => Err(malformed_error!(
            "Debug stream truncated at offset {}: {} name of {} bytes overruns the buffer",
            start,
            kind,
            str_len
        )),
        Err(error) => Err(error),
    }
}

/// Serialize a [`DebugObjectFileInfo`] per the stream grammar.
///
/// This is the emitter side of the contract and the exact inverse of
/// [`decode_debug_stream`] for every valid input: method records with their variable
/// lists, each list closed by a zero-length sentinel, the whole stream closed by the
/// end-of-methods sentinel.
#[must_use]
pub fn encode_debug_stream(info: &DebugObjectFileInfo) -> Vec<u8> {
    let mut out = Vec::new();

    for method in &info.methods {
        out.extend_from_slice(&(method.name.len() as u32).to_le_bytes());
        out.extend_from_slice(method.name.as_bytes());

        for variable in &method.variables {
            out.extend_from_slice(&(variable.name.len() as u32).to_le_bytes());
            out.extend_from_slice(variable.name.as_bytes());

            let flags = if variable.is_register_relative {
                FLAG_REGISTER_RELATIVE
            } else {
                0
            };
            out.push(flags);
            out.push(variable.register);
            out.extend_from_slice(&variable.offset.to_le_bytes());
        }

        // End of this method's variables
        out.extend_from_slice(&0u32.to_le_bytes());
    }

    // End of methods
    out.extend_from_slice(&0u32.to_le_bytes());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn method(name: &str, variables: Vec<VariableDebugInfo>) -> MethodDebugInfo {
        MethodDebugInfo {
            name: name.to_string(),
            variables,
        }
    }

    fn variable(name: &str, reg_relative: bool, register: u8, offset: i32) -> VariableDebugInfo {
        VariableDebugInfo {
            name: name.to_string(),
            is_register_relative: reg_relative,
            register,
            offset,
        }
    }

    #[test]
    fn empty_stream_is_absent() {
        assert!(decode_debug_stream(&[]).unwrap().is_none());
    }

    #[test]
    fn immediate_end_marker_yields_zero_methods() {
        let info = decode_debug_stream(&[0, 0, 0, 0]).unwrap().unwrap();
        assert!(info.methods.is_empty());
    }

    #[test]
    fn single_method_single_variable() {
        // Method "hello" with variable "foo": flags 1, reg 0xFE, offset 16,
        // then end-of-variables and end-of-methods sentinels
        let stream = [
            0x05, 0, 0, 0, b'h', b'e', b'l', b'l', b'o', // method name
            0x03, 0, 0, 0, b'f', b'o', b'o', // variable name
            0x01, // flags
            0xFE, // register
            0x10, 0, 0, 0, // offset
            0, 0, 0, 0, // end of variables
            0, 0, 0, 0, // end of methods
        ];

        let info = decode_debug_stream(&stream).unwrap().unwrap();
        assert_eq!(info.methods.len(), 1);

        let method = &info.methods[0];
        assert_eq!(method.name, "hello");
        assert_eq!(method.variables.len(), 1);
        assert_eq!(
            method.variables[0],
            variable("foo", true, 254, 16)
        );
    }

    #[test]
    fn round_trip() {
        let info = DebugObjectFileInfo {
            methods: vec![
                method("[J]com.example.Main.run()V", vec![]),
                method(
                    "[J]com.example.Main.compute(II)I",
                    vec![
                        variable("this", true, 0, 0),
                        variable("x", true, 7, -8),
                        variable("tmp", false, 255, 1024),
                    ],
                ),
                method("åäö.unicode()", vec![variable("λ", true, 128, i32::MIN)]),
            ],
        };

        let decoded = decode_debug_stream(&encode_debug_stream(&info))
            .unwrap()
            .unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn round_trip_full_register_range() {
        for register in [0u8, 1, 127, 128, 254, 255] {
            let info = DebugObjectFileInfo {
                methods: vec![method("m", vec![variable("v", true, register, 0)])],
            };
            let decoded = decode_debug_stream(&encode_debug_stream(&info))
                .unwrap()
                .unwrap();
            assert_eq!(decoded.methods[0].variables[0].register, register);
        }
    }

    #[test]
    fn reserved_flag_bits_are_ignored() {
        let stream = [
            0x01, 0, 0, 0, b'm', // method name
            0x01, 0, 0, 0, b'v', // variable name
            0xFE, // flags: bit 0 clear, reserved bits set
            0x02, // register
            0, 0, 0, 0, // offset
            0, 0, 0, 0, // end of variables
            0, 0, 0, 0, // end of methods
        ];

        let info = decode_debug_stream(&stream).unwrap().unwrap();
        assert!(!info.methods[0].variables[0].is_register_relative);
    }

    #[test]
    fn truncated_mid_name_is_malformed() {
        // Length prefix claims 5 bytes but only 3 remain
        let stream = [0x05, 0, 0, 0, b'a', b'b', b'c'];

        assert!(matches!(
            decode_debug_stream(&stream),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn invalid_utf8_name_is_malformed() {
        let stream = [
            0x02, 0, 0, 0, 0xFF, 0xFE, // invalid UTF-8 method name
            0, 0, 0, 0, // end of variables
            0, 0, 0, 0, // end of methods
        ];

        assert!(matches!(
            decode_debug_stream(&stream),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn missing_final_sentinel_is_malformed() {
        // Complete method record, but the stream ends before the end-of-methods marker
        let mut stream = Vec::new();
        stream.extend_from_slice(&2u32.to_le_bytes());
        stream.extend_from_slice(b"hi");
        stream.extend_from_slice(&0u32.to_le_bytes()); // end of variables only

        assert!(matches!(
            decode_debug_stream(&stream),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn truncated_fixed_fields_are_malformed() {
        // Variable name present but flags/reg/offset missing
        let stream = [
            0x01, 0, 0, 0, b'm', // method name
            0x01, 0, 0, 0, b'v', // variable name
            0x01, // flags only, register and offset missing
        ];

        assert!(matches!(
            decode_debug_stream(&stream),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn trailing_bytes_after_end_marker_are_ignored() {
        let mut stream = encode_debug_stream(&DebugObjectFileInfo {
            methods: vec![method("m", vec![])],
        });
        stream.extend_from_slice(&[0xDE, 0xAD]);

        let info = decode_debug_stream(&stream).unwrap().unwrap();
        assert_eq!(info.methods.len(), 1);
    }

    #[test]
    fn method_lookup_by_name() {
        let info = DebugObjectFileInfo {
            methods: vec![method("first", vec![]), method("second", vec![])],
        };

        assert_eq!(info.method_by_name("second").unwrap().name, "second");
        assert!(info.method_by_name("third").is_none());
    }
}
