//! Export functionality for dependency analysis results.
//!
//! This module provides exporters for outputting the classified
//! dependency list in various formats: plain text, JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;
pub mod plain;

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::analysis::LoadedDeps;
use crate::filter::DepEntry;
use crate::graph::CycleInfo;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// One `package<TAB>label` line per dependency
    #[default]
    Plain,
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(ExportFormat::Plain),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: plain, json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Plain => write!(f, "plain"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Number of dependencies in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub color: String,
    pub priority: i32,
    pub count: usize,
}

/// Data container for export operations.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Analysis root (module path, or package path outside a module)
    pub root: String,
    /// Classified dependencies in display order
    pub entries: Vec<DepEntry>,
    /// Import cycles in the forward graph
    pub cycles: Vec<CycleInfo>,
}

impl ExportData {
    /// Collects the exportable view of a load.
    ///
    /// Every entry is exported regardless of any filter applied.
    pub fn new(deps: &LoadedDeps) -> Self {
        Self {
            root: deps.root().to_string(),
            entries: deps.entries.iter().cloned().collect(),
            cycles: deps.cycles.clone(),
        }
    }

    /// Per-category counts, highest priority first, then by label.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<(Reverse<i32>, &str), (&str, usize)> = BTreeMap::new();
        for entry in &self.entries {
            let category = &entry.category;
            counts
                .entry((Reverse(category.priority), category.label.as_str()))
                .or_insert((category.color.as_str(), 0))
                .1 += 1;
        }

        counts
            .into_iter()
            .map(|((Reverse(priority), label), (color, count))| CategoryCount {
                label: label.to_string(),
                color: color.to_string(),
                priority,
                count,
            })
            .collect()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Plain => plain::PlainExporter.export(data, writer),
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) mod test_data {
    use super::ExportData;
    use crate::classify::Category;
    use crate::filter::{DepEntry, EntryList};
    use crate::graph::CycleInfo;

    pub fn sample() -> ExportData {
        let entries = EntryList::new(vec![
            DepEntry::new("fmt", Category::standard_library()),
            DepEntry::new("github.com/pkg/errors", Category::vendor()),
            DepEntry::new("github.com/acme/lib", Category::new("Internal", "green", 5)),
            DepEntry::new("os", Category::standard_library()),
        ]);
        ExportData {
            root: "github.com/acme/app".to_string(),
            entries: entries.iter().cloned().collect(),
            cycles: Vec::new(),
        }
    }

    pub fn with_cycle() -> ExportData {
        let mut data = sample();
        data.cycles = vec![CycleInfo {
            nodes: vec!["a".to_string(), "b".to_string()],
        }];
        data
    }
}
