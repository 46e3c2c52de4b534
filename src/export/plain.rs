//! Plain text export: one `package<TAB>label` line per dependency.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Plain text exporter implementation.
pub struct PlainExporter;

impl Exporter for PlainExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        for entry in &data.entries {
            writeln!(writer, "{}\t{}", entry.package, entry.category.label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_data;

    #[test]
    fn test_plain_export_in_display_order() {
        let data = test_data::sample();
        let mut output = Vec::new();
        PlainExporter.export(&data, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "github.com/acme/lib\tInternal",
                "github.com/pkg/errors\tVendor package",
                "fmt\tStandard library",
                "os\tStandard library",
            ]
        );
    }
}
