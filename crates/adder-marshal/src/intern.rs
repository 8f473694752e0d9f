//! String interning.
//!
//! Every string literal written into a stream is registered here; repeats
//! are encoded as back-references to the first occurrence. Indices are
//! assigned in order of first appearance, starting at zero, and never
//! change for the lifetime of the table.

use std::collections::HashMap;

/// Result of an intern lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interned {
    /// First occurrence; the caller must emit the literal bytes.
    New(usize),
    /// Seen before; the caller may emit a back-reference.
    Existing(usize),
}

/// Content-addressed string table.
///
/// One table exists per stream being written; tables are never shared
/// between streams.
#[derive(Debug, Default)]
pub struct StringTable {
    indices: HashMap<Vec<u8>, usize>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `text`, registering it at the next free index if absent.
    ///
    /// Never fails. The table grows without bound; whether an index is
    /// still referenceable on the wire is the encoder's concern.
    pub fn intern(&mut self, text: &[u8]) -> Interned {
        if let Some(&index) = self.indices.get(text) {
            return Interned::Existing(index);
        }
        let index = self.indices.len();
        self.indices.insert(text.to_vec(), index);
        Interned::New(index)
    }

    /// Number of distinct strings seen so far.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
