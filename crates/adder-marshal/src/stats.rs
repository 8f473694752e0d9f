//! Size and composition counters for a marshalled stream.

use serde::Serialize;

/// Counters collected while writing one stream.
///
/// Returned by [`crate::marshal`] and readable mid-stream through
/// [`crate::MarshalWriter::stats`]. Serializes to JSON for build reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarshalStats {
    /// Total bytes emitted, header included.
    pub bytes: u64,
    /// Integer values encoded.
    pub ints: u64,
    /// Distinct string literals emitted (equals the intern table size).
    pub strings: u64,
    /// Back-references emitted for repeated strings.
    pub string_refs: u64,
    /// Immutable sequences encoded.
    pub tuples: u64,
    /// Mutable sequences encoded.
    pub lists: u64,
    /// Mappings encoded.
    pub dicts: u64,
    /// Code units encoded.
    pub code_units: u64,
}
