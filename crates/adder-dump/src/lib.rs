//! Inspection reports for compiled Adder code units.
//!
//! Two renderings of one structure walk:
//! - [`dump`] prints an indented text report, one block per code unit,
//!   nested units following their parent in constant-pool order.
//! - [`summarize`] builds the same information as a [`UnitSummary`] tree
//!   for machine consumption; [`summary_json`] serializes it.
//!
//! Instruction bytes are opaque at this layer; reports show their length
//! only. Disassembly belongs to the execution engine.

use std::fmt::{self, Write as _};

use adder_object::{CodeUnit, Value};
use serde::Serialize;

/// Render a human-readable report of `unit` and every nested code unit.
pub fn dump(unit: &CodeUnit) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_unit(&mut out, unit, None);
    out
}

fn write_unit(out: &mut String, unit: &CodeUnit, parent: Option<&str>) -> fmt::Result {
    let qualified = match parent {
        Some(parent) => format!("{parent}.{}", unit_name(unit)),
        None => unit_name(unit),
    };

    writeln!(out, "code unit: {qualified}")?;
    writeln!(out, "  flags:      {:#07x} ({})", unit.flags.bits(), unit.flags)?;
    writeln!(out, "  stack size: {}", unit.stack_size)?;
    writeln!(out, "  arg count:  {}", unit.arg_count)?;
    writeln!(out, "  code:       {} bytes", unit.code.len())?;
    write_pool(out, "consts", &unit.consts)?;
    write_pool(out, "names", &unit.names)?;
    write_pool(out, "varnames", &unit.varnames)?;
    writeln!(out)?;

    for value in &unit.consts {
        if let Value::Code(nested) = value {
            write_unit(out, nested, Some(qualified.as_str()))?;
        }
    }
    Ok(())
}

fn write_pool(out: &mut String, label: &str, pool: &[Value]) -> fmt::Result {
    writeln!(out, "  {:<12}{}", format!("{label}:"), pool.len())?;
    for (i, value) in pool.iter().enumerate() {
        writeln!(out, "    {i:3}: {value}")?;
    }
    Ok(())
}

/// Machine-readable description of one code unit and its nested units.
#[derive(Debug, Clone, Serialize)]
pub struct UnitSummary {
    /// Unit name, lossily decoded; `<anonymous>` when empty.
    pub name: String,
    /// Raw flag word.
    pub flags: u32,
    /// Decoded names of the known flags that are set.
    pub flag_names: Vec<String>,
    pub stack_size: u32,
    pub arg_count: u32,
    /// Instruction stream length in bytes.
    pub code_len: usize,
    /// Constant pool rendered as literals.
    pub consts: Vec<String>,
    /// Name pool rendered as literals.
    pub names: Vec<String>,
    /// Local-name pool rendered as literals.
    pub varnames: Vec<String>,
    /// Code units found in the constant pool, in order.
    pub nested: Vec<UnitSummary>,
}

/// Build the summary tree for `unit`.
pub fn summarize(unit: &CodeUnit) -> UnitSummary {
    UnitSummary {
        name: unit_name(unit),
        flags: unit.flags.bits(),
        flag_names: unit.flags.names().into_iter().map(str::to_string).collect(),
        stack_size: unit.stack_size,
        arg_count: unit.arg_count,
        code_len: unit.code.len(),
        consts: render_pool(&unit.consts),
        names: render_pool(&unit.names),
        varnames: render_pool(&unit.varnames),
        nested: unit
            .consts
            .iter()
            .filter_map(|value| match value {
                Value::Code(nested) => Some(summarize(nested)),
                _ => None,
            })
            .collect(),
    }
}

/// Summary tree as pretty-printed JSON.
pub fn summary_json(unit: &CodeUnit) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&summarize(unit))
}

fn render_pool(pool: &[Value]) -> Vec<String> {
    pool.iter().map(Value::to_string).collect()
}

fn unit_name(unit: &CodeUnit) -> String {
    if unit.name.is_empty() {
        "<anonymous>".to_string()
    } else {
        String::from_utf8_lossy(&unit.name).into_owned()
    }
}
