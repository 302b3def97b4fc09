//! Decoding of the flattened address→line table.
//!
//! The line map collaborator hands back a flat sequence of 64-bit integers: element
//! `2i` is an instruction address, element `2i + 1` the stored line value for that
//! address. [`decode_line_table`] reshapes that sequence into typed
//! [`LineInfo`] records, preserving table order exactly - addresses may repeat across
//! line boundaries and the mapping is only meaningful in emission order.

use crate::Result;

/// A single address→source-line mapping entry.
///
/// One record per pair in the flattened table. The stored line value is carried as
/// 64 bits on the wire but only the low 32 bits are meaningful; the upper half is
/// discarded during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// Instruction address this entry maps
    pub address: u64,
    /// Source line number for the address
    pub line_number: u32,
}

/// Decode a flattened `(address, line)` pair sequence into ordered [`LineInfo`] records.
///
/// Emits exactly `count` records in input order. `count == 0` yields an empty vector,
/// which is a legitimate result - a symbol can have no line mapping at all (labels,
/// stripped debug info).
///
/// The pair layout is a contract with the producing side: `pairs.len()` must equal
/// `2 * count`. The reshape itself cannot fail, so a mismatch is a caller bug and is
/// rejected hard rather than silently truncated or zero-padded.
///
/// # Arguments
/// * `pairs` - Flat sequence; element `2i` is an address, element `2i + 1` a line value
/// * `count` - Number of entries encoded in `pairs`
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if `pairs.len() != 2 * count`.
///
/// # Examples
///
/// ```rust
/// use debugscope::debuginfo::decode_line_table;
///
/// let pairs = [0x1000, 42, 0x1004, 43];
/// let infos = decode_line_table(&pairs, 2)?;
///
/// assert_eq!(infos[0].address, 0x1000);
/// assert_eq!(infos[0].line_number, 42);
/// assert_eq!(infos[1].address, 0x1004);
/// # Ok::<(), debugscope::Error>(())
/// ```
pub fn decode_line_table(pairs: &[u64], count: u32) -> Result<Vec<LineInfo>> {
    let entries = count as usize;
    let expected = entries.checked_mul(2).ok_or_else(|| {
        malformed_error!("Line table entry count overflows: {}", count)
    })?;

    if pairs.len() != expected {
        return Err(malformed_error!(
            "Line table length mismatch: {} values for {} entries",
            pairs.len(),
            count
        ));
    }

    let mut result = Vec::with_capacity(entries);
    for i in 0..entries {
        result.push(LineInfo {
            address: pairs[i * 2],
            // Upper 32 bits of the stored line value are unused by the emitter
            line_number: pairs[i * 2 + 1] as u32,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn decode_preserves_order() {
        let pairs = [0x2000, 10, 0x2004, 12, 0x2000, 11];
        let infos = decode_line_table(&pairs, 3).unwrap();

        assert_eq!(infos.len(), 3);
        assert_eq!(
            infos[0],
            LineInfo {
                address: 0x2000,
                line_number: 10
            }
        );
        assert_eq!(
            infos[1],
            LineInfo {
                address: 0x2004,
                line_number: 12
            }
        );
        // Repeated address stays in table order, never re-sorted
        assert_eq!(
            infos[2],
            LineInfo {
                address: 0x2000,
                line_number: 11
            }
        );
    }

    #[test]
    fn decode_empty() {
        let infos = decode_line_table(&[], 0).unwrap();
        assert!(infos.is_empty());
    }

    #[test]
    fn decode_truncates_line_to_32_bits() {
        let pairs = [0x1000, 0xDEAD_BEEF_0000_002A];
        let infos = decode_line_table(&pairs, 1).unwrap();

        assert_eq!(infos[0].line_number, 0x2A);
    }

    #[test]
    fn decode_rejects_count_mismatch() {
        let pairs = [0x1000, 42, 0x1004];

        assert!(matches!(
            decode_line_table(&pairs, 2),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            decode_line_table(&pairs, 1),
            Err(Error::Malformed { .. })
        ));
    }
}
