//! Shared object model for the Adder toolchain.
//!
//! This crate defines the runtime value representation ([`Value`]), compiled
//! code units ([`CodeUnit`]) and their flag word ([`CodeFlags`]). The
//! front-end compiler produces these, the marshaller serializes them, and
//! the inspection tooling reports on them.

mod code;
mod value;

pub use code::{CodeFlags, CodeUnit};
pub use value::{Value, ValueKind};
