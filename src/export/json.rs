//! JSON export implementation.
//!
//! Exports dependency analysis results in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable dependency for JSON output.
#[derive(Serialize)]
struct JsonDependency<'a> {
    package: &'a str,
    label: &'a str,
    color: &'a str,
    priority: i32,
}

/// Serializable cycle info for JSON output.
#[derive(Serialize)]
struct JsonCycle<'a> {
    packages: &'a [String],
    path: String,
}

#[derive(Serialize)]
struct JsonCategory {
    label: String,
    color: String,
    priority: i32,
    count: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    root: &'a str,
    total_dependencies: usize,
    categories: Vec<JsonCategory>,
    dependencies: Vec<JsonDependency<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    import_cycles: Vec<JsonCycle<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let dependencies = data
            .entries
            .iter()
            .map(|entry| JsonDependency {
                package: &entry.package,
                label: &entry.category.label,
                color: &entry.category.color,
                priority: entry.category.priority,
            })
            .collect();

        let categories = data
            .category_counts()
            .into_iter()
            .map(|c| JsonCategory {
                label: c.label,
                color: c.color,
                priority: c.priority,
                count: c.count,
            })
            .collect();

        let import_cycles = data
            .cycles
            .iter()
            .map(|c| JsonCycle {
                packages: &c.nodes,
                path: c.cycle_path(),
            })
            .collect();

        let export = JsonExport {
            root: &data.root,
            total_dependencies: data.entries.len(),
            categories,
            dependencies,
            import_cycles,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_data;

    fn export_value(data: &ExportData) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(data, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_export_basic() {
        let parsed = export_value(&test_data::sample());

        assert_eq!(parsed["root"], "github.com/acme/app");
        assert_eq!(parsed["total_dependencies"], 4);
        assert_eq!(parsed["categories"][0]["label"], "Internal");
        assert_eq!(parsed["categories"][2]["count"], 2);
        assert!(parsed.get("import_cycles").is_none());
    }

    #[test]
    fn test_json_export_dependencies_list() {
        let parsed = export_value(&test_data::sample());

        let deps = parsed["dependencies"].as_array().unwrap();
        assert_eq!(deps.len(), 4);
        assert_eq!(deps[0]["package"], "github.com/acme/lib");
        assert_eq!(deps[0]["priority"], 5);
        assert_eq!(deps[1]["label"], "Vendor package");
        assert_eq!(deps[1]["color"], "#9b59b6");
    }

    #[test]
    fn test_json_export_with_cycles() {
        let parsed = export_value(&test_data::with_cycle());

        assert_eq!(parsed["import_cycles"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["import_cycles"][0]["path"], "a -> b -> a");
    }
}
