//! Wire format constants.
//!
//! A marshalled module stream is the 16-byte header followed by exactly one
//! encoded value, conventionally a code unit:
//!
//! ```text
//! stream := MAGIC FORMAT_VERSION value
//! value  := 'N' | 'F' | 'T'            none / false / true
//!         | 'i' i32                    integer
//!         | 's' u8  byte*              short string literal
//!         | 'S' u32 byte*              long string literal
//!         | 'r' u8                     string back-reference
//!         | 'R' u16                    wide string back-reference
//!         | '(' u32 value*             immutable sequence, counted
//!         | '[' u32 value*             mutable sequence, counted
//!         | '{' (value value)* '0'     mapping, terminated
//!         | 'c' code-unit
//! ```
//!
//! A code unit is a fixed field sequence: name (string), then flags, stack
//! size and arg count as raw little-endian `u32` words, then the
//! instruction bytes (string), then `consts`, `names` and `varnames` each
//! framed like an immutable sequence.
//!
//! All multi-byte integers are little-endian. Lengths and counts are
//! 32-bit. A string's first occurrence is written as a literal and entered
//! into the intern table; every later occurrence is a back-reference to
//! its table index.

/// Identifies a marshalled Adder module stream.
pub const MAGIC: [u8; 14] = *b"MyLittlePython";

/// Stream format version, bumped on any wire change.
pub const FORMAT_VERSION: u16 = 0x0101;

/// Back-references carry at most 16 bits, so only the first 65536 intern
/// table entries can be referenced. The table itself may grow past this;
/// only a reference to a later entry fails.
pub const MAX_STRING_REFS: usize = 0x1_0000;

/// Maximum value nesting the encoder will follow before failing with
/// [`crate::MarshalError::NestingTooDeep`].
pub const MAX_DEPTH: usize = 1000;

/// The singleton "no value".
pub const TAG_NONE: u8 = b'N';
/// Boolean false.
pub const TAG_FALSE: u8 = b'F';
/// Boolean true.
pub const TAG_TRUE: u8 = b'T';
/// Integer; 4-byte two's-complement payload.
pub const TAG_INT: u8 = b'i';
/// String literal shorter than 256 bytes; 1-byte length.
pub const TAG_STR8: u8 = b's';
/// String literal with a 4-byte length.
pub const TAG_STR32: u8 = b'S';
/// Back-reference to one of the first 256 interned strings; 1-byte index.
pub const TAG_STRREF8: u8 = b'r';
/// Back-reference with a 2-byte index.
pub const TAG_STRREF16: u8 = b'R';
/// Immutable sequence; 4-byte count, then the elements.
pub const TAG_TUPLE: u8 = b'(';
/// Mutable sequence; 4-byte count, then the elements.
pub const TAG_LIST: u8 = b'[';
/// Mapping; key/value pairs until [`TAG_DICT_END`].
pub const TAG_DICT: u8 = b'{';
/// Terminates a mapping. Never a standalone value.
pub const TAG_DICT_END: u8 = b'0';
/// Code unit; fixed field sequence, see the module doc.
pub const TAG_CODE: u8 = b'c';

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tags_are_distinct() {
        let tags = [
            TAG_NONE, TAG_FALSE, TAG_TRUE, TAG_INT, TAG_STR8, TAG_STR32,
            TAG_STRREF8, TAG_STRREF16, TAG_TUPLE, TAG_LIST, TAG_DICT,
            TAG_DICT_END, TAG_CODE,
        ];
        let distinct: HashSet<u8> = tags.iter().copied().collect();
        assert_eq!(distinct.len(), tags.len());
    }

    #[test]
    fn test_magic_is_fourteen_bytes() {
        assert_eq!(MAGIC.len(), 14);
        assert_eq!(&MAGIC, b"MyLittlePython");
    }
}
