//! Compiled code units and their flag word.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::Value;

/// A compiled Adder code unit.
///
/// The executable form of one function or module body. Nested functions
/// live in `consts` as further [`Value::Code`] entries, so a compiled
/// module is a tree of code units with the module body at the root.
///
/// Free and cell variable tables are not part of the persisted form;
/// the engine resolves closures at call time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeUnit {
    /// Unit name as written in the source (byte string).
    pub name: Vec<u8>,
    /// Behavior flags, see [`CodeFlags`].
    pub flags: CodeFlags,
    /// Operand stack slots the engine must reserve.
    pub stack_size: u32,
    /// Declared positional parameter count.
    pub arg_count: u32,
    /// Raw instruction bytes. Opaque to everything but the engine.
    pub code: Vec<u8>,
    /// Constant pool, indexed by the instruction stream.
    pub consts: Vec<Value>,
    /// Global and attribute names referenced by the instruction stream.
    pub names: Vec<Value>,
    /// Local variable names, parameters first.
    pub varnames: Vec<Value>,
}

impl CodeUnit {
    /// Empty unit with the given name. A convenient base for
    /// struct-update construction.
    pub fn named(name: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Code unit flag word.
///
/// A bitmask newtype: combine with `|`, query with [`CodeFlags::contains`].
/// The numeric values are part of the wire format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CodeFlags(pub u32);

impl CodeFlags {
    // ── Unit shape ──
    /// The unit gets a fresh local namespace on every call.
    pub const NEWLOCALS: Self = Self(1 << 1);
    /// The unit accepts a `*args` tail parameter.
    pub const VARARGS: Self = Self(1 << 2);
    /// The unit accepts a `**kwargs` parameter.
    pub const VARKWDS: Self = Self(1 << 3);
    /// The unit is lexically nested inside another unit.
    pub const NESTED: Self = Self(1 << 4);
    /// Calling the unit produces a generator.
    pub const GENERATOR: Self = Self(1 << 5);
    /// The unit closes over no free variables.
    pub const NOFREE: Self = Self(1 << 6);

    // ── Future-import gates in effect at compile time ──
    pub const FUTURE_DIVISION: Self = Self(0x2000);
    pub const FUTURE_ABSOLUTE_IMPORT: Self = Self(0x4000);
    pub const FUTURE_WITH_STATEMENT: Self = Self(0x8000);
    pub const FUTURE_UNICODE_LITERALS: Self = Self(0x20000);

    const ALL: [(Self, &'static str); 10] = [
        (Self::NEWLOCALS, "NEWLOCALS"),
        (Self::VARARGS, "VARARGS"),
        (Self::VARKWDS, "VARKWDS"),
        (Self::NESTED, "NESTED"),
        (Self::GENERATOR, "GENERATOR"),
        (Self::NOFREE, "NOFREE"),
        (Self::FUTURE_DIVISION, "FUTURE_DIVISION"),
        (Self::FUTURE_ABSOLUTE_IMPORT, "FUTURE_ABSOLUTE_IMPORT"),
        (Self::FUTURE_WITH_STATEMENT, "FUTURE_WITH_STATEMENT"),
        (Self::FUTURE_UNICODE_LITERALS, "FUTURE_UNICODE_LITERALS"),
    ];

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The raw flag word, as encoded on the wire.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the known flags that are set, in bit order. Unknown bits
    /// are skipped.
    pub fn names(self) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for CodeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CodeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for CodeFlags {
    /// Comma-joined names of the set flags, `-` when none are known.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&names.join(", "))
        }
    }
}
