//! Parser for `go list -deps` import records.
//!
//! Each record is one line: `<package> <rootModule|_> <import>...`. The
//! stream is consumed line by line so a slow producer never has to finish
//! before the graph starts filling.

use std::io::BufRead;

use tracing::trace;

use super::types::{ImportRecord, NO_MODULE};
use crate::graph::{ImportGraph, ModuleIndex};

/// Errors that can occur while reading the record stream.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read from the stream.
    #[error("Failed to read import records: {0}")]
    IoError(#[from] std::io::Error),

    /// A record did not have the expected `<package> <module> <imports...>` shape.
    #[error("Malformed import record on line {line}: {reason} ({content:?})")]
    MalformedRecord {
        line: usize,
        reason: &'static str,
        content: String,
    },
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Forward graph and module membership built from a record stream.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    /// Package → imported packages
    pub forward: ImportGraph,
    /// Module roots and their member packages
    pub modules: ModuleIndex,
}

/// Parses a single record line.
///
/// # Example
///
/// ```
/// use showdeps::parser::parse_record;
///
/// let record = parse_record("example.com/app/cmd example.com/app fmt os", 1).unwrap();
/// assert_eq!(record.package, "example.com/app/cmd");
/// assert_eq!(record.module.as_deref(), Some("example.com/app"));
/// assert_eq!(record.imports, vec!["fmt", "os"]);
/// ```
pub fn parse_record(line: &str, line_number: usize) -> ParseResult<ImportRecord> {
    let malformed = |reason| ParseError::MalformedRecord {
        line: line_number,
        reason,
        content: line.to_string(),
    };

    let mut fields = line.splitn(3, ' ');
    let package = fields.next().filter(|p| !p.is_empty());
    let module = fields.next();

    let (package, module) = match (package, module) {
        (Some(package), Some(module)) if !module.is_empty() => (package, module),
        (None, _) => return Err(malformed("missing package path")),
        _ => return Err(malformed("missing root module field")),
    };

    let imports = fields
        .next()
        .map(|rest| rest.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    Ok(ImportRecord {
        package: package.to_string(),
        module: (module != NO_MODULE).then(|| module.to_string()),
        imports,
    })
}

impl ParsedRecords {
    /// Folds one record into the graph and module index.
    pub fn apply(&mut self, record: &ImportRecord) {
        self.forward.add_package(&record.package);
        for import in &record.imports {
            self.forward.add_edge(&record.package, import);
        }
        if let Some(module) = &record.module {
            self.modules.register(&record.package, module);
        }
    }
}

/// Reads every record from `reader`, building the forward graph as it goes.
///
/// Blank lines are skipped. The first malformed record aborts the whole
/// load; there is no partial result.
pub fn parse_records<R: BufRead>(reader: R) -> ParseResult<ParsedRecords> {
    let mut parsed = ParsedRecords::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record(line, idx + 1)?;
        trace!(package = %record.package, imports = record.imports.len(), "parsed record");
        parsed.apply(&record);
    }

    Ok(parsed)
}

/// Parses records from an in-memory string.
pub fn parse_records_str(content: &str) -> ParseResult<ParsedRecords> {
    parse_records(content.as_bytes())
}
