//! Marshalling error types.

use adder_object::ValueKind;
use thiserror::Error;

use crate::format::MAX_DEPTH;

/// Errors that can occur while marshalling a value graph.
///
/// None of these are recoverable: once an error surfaces, bytes already
/// written to the sink must be discarded by the caller.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// A value kind the wire format has no encoding for.
    #[error("cannot marshal a value of kind '{kind}'")]
    UnsupportedType { kind: ValueKind },

    /// A repeated string landed past the last referenceable table slot.
    #[error("string table overflow: entry {index} does not fit in a 16-bit back-reference")]
    StringTableOverflow { index: usize },

    /// A string or sequence whose length does not fit the 4-byte field.
    #[error("length overflow: {len} does not fit in a 32-bit length field")]
    LengthOverflow { len: usize },

    /// The value graph nests deeper than the encoder follows.
    #[error("value graph nests deeper than {} levels", MAX_DEPTH)]
    NestingTooDeep,

    /// The output sink failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Marshalling result type alias.
pub type MarshalResult<T> = Result<T, MarshalError>;
