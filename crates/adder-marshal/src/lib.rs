//! Adder module marshaller: compiled code units to portable byte streams.
//!
//! # Stream layout
//!
//! A marshalled module (`.adc` file) is a 14-byte magic, a 2-byte format
//! version, then exactly one encoded value, conventionally the module
//! body's code unit with every nested function inside its constant pool.
//! See [`format`] for the full wire grammar.
//!
//! The encoder walks the value graph depth-first and writes tag-prefixed,
//! little-endian records directly to any [`std::io::Write`] sink. String
//! literals are deduplicated through a per-stream intern table; repeats
//! become 1- or 2-byte back-references. Decoding is the execution engine's
//! side of the contract and lives there, not here.
//!
//! ```
//! use adder_object::{CodeUnit, Value};
//! use adder_marshal::marshal_to_vec;
//!
//! let module = CodeUnit::named("main");
//! let stream = marshal_to_vec(&Value::code(module)).unwrap();
//! assert_eq!(&stream[..14], b"MyLittlePython");
//! ```

pub mod error;
pub mod fingerprint;
pub mod format;
pub mod intern;
pub mod stats;
pub mod writer;

pub use error::{MarshalError, MarshalResult};
pub use fingerprint::Fingerprint;
pub use stats::MarshalStats;
pub use writer::MarshalWriter;

use std::io::Write;

use adder_object::Value;

/// Marshal `root` into `sink`: header first, then the value graph.
///
/// Every call uses a fresh intern table; nothing persists between calls.
/// On error, bytes already written stay in the sink and the stream must
/// be discarded.
pub fn marshal<W: Write>(root: &Value, sink: W) -> MarshalResult<MarshalStats> {
    let mut writer = MarshalWriter::new(sink);
    writer.write_header()?;
    writer.write_value(root)?;
    Ok(writer.stats())
}

/// Marshal `root` into a fresh buffer.
pub fn marshal_to_vec(root: &Value) -> MarshalResult<Vec<u8>> {
    let mut stream = Vec::new();
    marshal(root, &mut stream)?;
    Ok(stream)
}
