//! CSV export implementation.
//!
//! Exports dependency analysis results in CSV format for spreadsheet use.

use super::{ExportData, Exporter};
use std::collections::HashSet;
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "package,label,priority,color,in_cycle")?;

        let cycle_packages: HashSet<&str> = data
            .cycles
            .iter()
            .flat_map(|c| c.nodes.iter().map(String::as_str))
            .collect();

        for entry in &data.entries {
            writeln!(
                writer,
                "{},{},{},{},{}",
                Self::escape_field(&entry.package),
                Self::escape_field(&entry.category.label),
                entry.category.priority,
                Self::escape_field(&entry.category.color),
                cycle_packages.contains(entry.package.as_str())
            )?;
        }

        Ok(())
    }
}
