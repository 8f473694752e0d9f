//! The stream writer: header, tag dispatch, interning, code units.

use std::io::Write;

use adder_object::{CodeUnit, Value};

use crate::error::{MarshalError, MarshalResult};
use crate::format::*;
use crate::intern::{Interned, StringTable};
use crate::stats::MarshalStats;

/// Streaming encoder for one marshalled module.
///
/// Owns the sink, the intern table and the counters for exactly one
/// stream. [`write_header`](Self::write_header) must be called once,
/// before the root value; [`crate::marshal`] takes care of that.
///
/// Bytes go straight to the sink. On error the bytes written so far stay
/// there and the stream must be discarded; there is no rollback.
pub struct MarshalWriter<W: Write> {
    sink: W,
    strings: StringTable,
    stats: MarshalStats,
    depth: usize,
}

impl<W: Write> MarshalWriter<W> {
    /// Wrap a sink. Writes nothing until asked.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            strings: StringTable::new(),
            stats: MarshalStats::default(),
            depth: 0,
        }
    }

    /// Counters for everything written so far.
    pub fn stats(&self) -> MarshalStats {
        self.stats
    }

    /// Give the sink back.
    pub fn into_inner(self) -> W {
        self.sink
    }

    // ── Stream structure ─────────────────────────────────────────────────

    /// Write the 16-byte stream header: magic, then format version.
    pub fn write_header(&mut self) -> MarshalResult<()> {
        self.emit(&MAGIC)?;
        self.emit_u16(FORMAT_VERSION)
    }

    /// Encode one value, depth-first.
    pub fn write_value(&mut self, value: &Value) -> MarshalResult<()> {
        match value {
            Value::Nil => self.emit(&[TAG_NONE]),
            Value::Bool(false) => self.emit(&[TAG_FALSE]),
            Value::Bool(true) => self.emit(&[TAG_TRUE]),
            Value::Int(i) => {
                self.stats.ints += 1;
                self.emit(&[TAG_INT])?;
                self.emit_i32(*i)
            }
            // not encodable; nothing is written for the failing value
            Value::Float(_) => Err(MarshalError::UnsupportedType { kind: value.kind() }),
            Value::Str(text) => self.write_str(text),
            Value::Tuple(items) => {
                self.stats.tuples += 1;
                self.write_seq(TAG_TUPLE, items)
            }
            Value::List(items) => {
                self.stats.lists += 1;
                self.write_seq(TAG_LIST, items)
            }
            Value::Dict(pairs) => {
                self.stats.dicts += 1;
                self.write_dict(pairs)
            }
            Value::Code(unit) => self.write_code(unit),
        }
    }

    /// Write one string: a literal on first occurrence, a back-reference
    /// after that. A string longer than the 4-byte length field can
    /// carry is rejected before it touches the table or the sink.
    pub fn write_str(&mut self, text: &[u8]) -> MarshalResult<()> {
        let len = length_field(text.len())?;
        match self.strings.intern(text) {
            Interned::New(_) => {
                self.stats.strings += 1;
                if text.len() < 0x100 {
                    self.emit(&[TAG_STR8, text.len() as u8])?;
                } else {
                    self.emit(&[TAG_STR32])?;
                    self.emit_u32(len)?;
                }
                self.emit(text)
            }
            Interned::Existing(index) => {
                self.stats.string_refs += 1;
                if index < 0x100 {
                    self.emit(&[TAG_STRREF8, index as u8])
                } else if index < MAX_STRING_REFS {
                    self.emit(&[TAG_STRREF16])?;
                    self.emit_u16(index as u16)
                } else {
                    Err(MarshalError::StringTableOverflow { index })
                }
            }
        }
    }

    /// Write a code unit: tag, then the fixed field sequence of name,
    /// flags, stack size, arg count, instruction bytes, consts, names
    /// and varnames. The field order is part of the wire format.
    pub fn write_code(&mut self, unit: &CodeUnit) -> MarshalResult<()> {
        self.stats.code_units += 1;
        self.enter()?;
        let result = self.code_body(unit);
        self.leave();
        result
    }

    fn code_body(&mut self, unit: &CodeUnit) -> MarshalResult<()> {
        self.emit(&[TAG_CODE])?;
        self.write_str(&unit.name)?;
        self.emit_u32(unit.flags.bits())?;
        self.emit_u32(unit.stack_size)?;
        self.emit_u32(unit.arg_count)?;
        self.write_str(&unit.code)?;
        self.write_seq(TAG_TUPLE, &unit.consts)?;
        self.write_seq(TAG_TUPLE, &unit.names)?;
        self.write_seq(TAG_TUPLE, &unit.varnames)
    }

    /// Counted-sequence framing shared by tuples, lists and code unit
    /// pools: tag, 4-byte count, then the elements in order.
    fn write_seq(&mut self, tag: u8, items: &[Value]) -> MarshalResult<()> {
        let count = length_field(items.len())?;
        self.enter()?;
        let result = self.seq_body(tag, count, items);
        self.leave();
        result
    }

    fn seq_body(&mut self, tag: u8, count: u32, items: &[Value]) -> MarshalResult<()> {
        self.emit(&[tag])?;
        self.emit_u32(count)?;
        for item in items {
            self.write_value(item)?;
        }
        Ok(())
    }

    /// Mapping framing: tag, flattened key/value pairs in insertion
    /// order, terminator. No count prefix.
    fn write_dict(&mut self, pairs: &[(Value, Value)]) -> MarshalResult<()> {
        self.enter()?;
        let result = self.dict_body(pairs);
        self.leave();
        result
    }

    fn dict_body(&mut self, pairs: &[(Value, Value)]) -> MarshalResult<()> {
        self.emit(&[TAG_DICT])?;
        for (key, value) in pairs {
            self.write_value(key)?;
            self.write_value(value)?;
        }
        self.emit(&[TAG_DICT_END])
    }

    // ── Depth guard ──────────────────────────────────────────────────────
    // Every completed `enter` is paired with a `leave`, error paths
    // included; a failed write leaves `depth` balanced.

    fn enter(&mut self) -> MarshalResult<()> {
        if self.depth == MAX_DEPTH {
            return Err(MarshalError::NestingTooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // ── Raw little-endian output ─────────────────────────────────────────

    /// Every byte leaving the writer funnels through here.
    fn emit(&mut self, bytes: &[u8]) -> MarshalResult<()> {
        self.sink.write_all(bytes)?;
        self.stats.bytes += bytes.len() as u64;
        Ok(())
    }

    fn emit_u16(&mut self, v: u16) -> MarshalResult<()> {
        self.emit(&v.to_le_bytes())
    }

    fn emit_u32(&mut self, v: u32) -> MarshalResult<()> {
        self.emit(&v.to_le_bytes())
    }

    fn emit_i32(&mut self, v: i32) -> MarshalResult<()> {
        self.emit(&v.to_le_bytes())
    }
}

/// Checked conversion for the 4-byte length and count fields. Fails
/// rather than wrapping past `u32::MAX`.
fn length_field(len: usize) -> MarshalResult<u32> {
    u32::try_from(len).map_err(|_| MarshalError::LengthOverflow { len })
}
