//! Runtime values.
//!
//! [`Value`] is the closed set of kinds a constant pool may hold. Matching
//! on it is always exhaustive; adding a kind is a cross-stage change
//! (front-end, marshaller, execution engine) and must never happen in only
//! one place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CodeUnit;

/// A constant-pool value.
///
/// Text is a raw byte sequence, not validated UTF-8: string literals and
/// instruction streams travel through the same representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The singleton "no value".
    Nil,
    /// `True` / `False`.
    Bool(bool),
    /// Signed 32-bit integer. Wider literals must be rejected by the
    /// front-end; this representation cannot hold them.
    Int(i32),
    /// 64-bit float. Part of the runtime model but not yet marshallable.
    Float(f64),
    /// Byte string.
    Str(Vec<u8>),
    /// Immutable sequence.
    Tuple(Vec<Value>),
    /// Mutable sequence.
    List(Vec<Value>),
    /// Key/value pairs, insertion order preserved.
    Dict(Vec<(Value, Value)>),
    /// A compiled code unit (function body, module body, ...).
    Code(Box<CodeUnit>),
}

impl Value {
    /// Build a `Str` from anything byte-like.
    pub fn str(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Str(bytes.into())
    }

    /// Build a `Code` value without boxing at the call site.
    pub fn code(unit: CodeUnit) -> Self {
        Value::Code(Box::new(unit))
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::List(_) => ValueKind::List,
            Value::Dict(_) => ValueKind::Dict,
            Value::Code(_) => ValueKind::Code,
        }
    }
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    Tuple,
    List,
    Dict,
    Code,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Nil => "nil",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::Tuple => "tuple",
            ValueKind::List => "list",
            ValueKind::Dict => "dict",
            ValueKind::Code => "code",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Value {
    /// Renders the value as an Adder literal: `None`, `True`, `42`, `'hi'`
    /// with `\xNN` escapes for non-printable bytes, `(1, 2)`, `[1, 2]`,
    /// `{k: v}`, `<code unit 'name'>`. Deterministic; dump reports rely
    /// on it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => fmt_bytes(f, s),
            Value::Tuple(items) => {
                f.write_str("(")?;
                fmt_join(f, items)?;
                // single-element tuples keep the trailing comma
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::List(items) => {
                f.write_str("[")?;
                fmt_join(f, items)?;
                f.write_str("]")
            }
            Value::Dict(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Code(unit) => {
                write!(f, "<code unit '{}'>", String::from_utf8_lossy(&unit.name))
            }
        }
    }
}

fn fmt_join(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Single-quoted byte-string literal. Quotes, backslashes and the common
/// control characters get short escapes, everything else non-printable
/// becomes `\xNN`.
fn fmt_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("'")?;
    for &b in bytes {
        match b {
            b'\'' => f.write_str("\\'")?,
            b'\\' => f.write_str("\\\\")?,
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\t' => f.write_str("\\t")?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\x{b:02x}")?,
        }
    }
    f.write_str("'")
}
