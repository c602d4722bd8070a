//! Command implementations for the NFL feeds CLI

pub mod sis;
pub mod trumedia;

use std::io::Write;

use crate::{Result, Table};


/// Write `table` as CSV, or as a JSON array of records when `as_json`.
pub fn write_table<W: Write>(table: &Table, as_json: bool, mut writer: W) -> Result<()> {
    if as_json {
        serde_json::to_writer_pretty(&mut writer, table)?;
        writeln!(writer)?;
        Ok(())
    } else {
        table.write_csv(writer)
    }
}

/// Print `table` to stdout.
pub fn print_table(table: &Table, as_json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    write_table(table, as_json, stdout.lock())
}
