//! Markdown export implementation.
//!
//! Exports dependency analysis results in Markdown format for documentation and reporting.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Dependency Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Root:** `{}`", data.root)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Category | Priority | Count |")?;
        writeln!(writer, "|----------|----------|-------|")?;
        for count in data.category_counts() {
            writeln!(
                writer,
                "| {} | {} | {} |",
                count.label, count.priority, count.count
            )?;
        }
        writeln!(writer, "| **Total** | | {} |", data.entries.len())?;
        writeln!(writer)?;

        // Dependencies, grouped by category in display order
        writeln!(writer, "## Dependencies")?;
        writeln!(writer)?;
        for count in data.category_counts() {
            writeln!(writer, "### {} ({})", count.label, count.count)?;
            writeln!(writer)?;
            for entry in data.entries.iter().filter(|e| {
                e.category.label == count.label && e.category.priority == count.priority
            }) {
                writeln!(writer, "- `{}`", entry.package)?;
            }
            writeln!(writer)?;
        }

        if !data.cycles.is_empty() {
            writeln!(writer, "## Import Cycles")?;
            writeln!(writer)?;
            for (i, cycle) in data.cycles.iter().enumerate() {
                writeln!(writer, "{}. `{}`", i + 1, cycle.cycle_path())?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by showdeps*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_data;

    fn export_string(data: &ExportData) -> String {
        let mut output = Vec::new();
        MarkdownExporter.export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_export_basic() {
        let md_str = export_string(&test_data::sample());

        assert!(md_str.contains("# Dependency Report"));
        assert!(md_str.contains("**Root:** `github.com/acme/app`"));
        assert!(md_str.contains("| Standard library | 0 | 2 |"));
        assert!(md_str.contains("| **Total** | | 4 |"));
        assert!(!md_str.contains("## Import Cycles"));
    }

    #[test]
    fn test_markdown_groups_by_category() {
        let md_str = export_string(&test_data::sample());

        let internal = md_str.find("### Internal (1)").unwrap();
        let stdlib = md_str.find("### Standard library (2)").unwrap();
        let fmt = md_str.find("- `fmt`").unwrap();
        assert!(internal < stdlib);
        assert!(stdlib < fmt);
    }

    #[test]
    fn test_markdown_lists_cycles() {
        let md_str = export_string(&test_data::with_cycle());
        assert!(md_str.contains("## Import Cycles"));
        assert!(md_str.contains("1. `a -> b -> a`"));
    }
}
