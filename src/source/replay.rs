//! Package source replaying captured `go list` output.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use super::{line_set, PackageSource};
use crate::error::SourceError;
use crate::parser::SelfIdentity;

/// Serves records, self identification and the standard library set from
/// memory or from files captured earlier.
pub struct ReplaySource {
    records: Option<Box<dyn BufRead + Send>>,
    identity: SelfIdentity,
    stdlib: HashSet<String>,
}

impl ReplaySource {
    /// Creates a source from a record reader and pre-parsed companions.
    pub fn new(
        records: impl BufRead + Send + 'static,
        identity: SelfIdentity,
        stdlib: HashSet<String>,
    ) -> Self {
        Self {
            records: Some(Box::new(records)),
            identity,
            stdlib,
        }
    }

    /// Creates a source from in-memory text.
    ///
    /// # Example
    ///
    /// ```
    /// use showdeps::source::{PackageSource, ReplaySource};
    ///
    /// let mut source = ReplaySource::from_text("a _ fmt\n", "a", ["fmt"]);
    /// assert_eq!(source.self_identity().unwrap().root(), "a");
    /// assert!(source.standard_packages().unwrap().contains("fmt"));
    /// ```
    pub fn from_text<'a>(
        records: &str,
        self_id: &str,
        stdlib: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::new(
            Cursor::new(records.to_string()),
            SelfIdentity::parse(self_id),
            stdlib.into_iter().map(str::to_string).collect(),
        )
    }

    /// Opens a captured record file, with optional self identification and
    /// standard library listing (one package per line).
    pub fn open(
        records: &Path,
        self_id: Option<&str>,
        std_list: Option<&Path>,
    ) -> Result<Self, SourceError> {
        let file = File::open(records).map_err(|source| SourceError::Read {
            path: records.display().to_string(),
            source,
        })?;

        let stdlib = match std_list {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| SourceError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                line_set(&content)
            }
            None => HashSet::new(),
        };

        Ok(Self::new(
            BufReader::new(file),
            SelfIdentity::parse(self_id.unwrap_or_default()),
            stdlib,
        ))
    }
}

impl PackageSource for ReplaySource {
    fn records(&mut self) -> Result<Box<dyn BufRead + Send>, SourceError> {
        self.records.take().ok_or(SourceError::StreamConsumed)
    }

    fn self_identity(&mut self) -> Result<SelfIdentity, SourceError> {
        Ok(self.identity.clone())
    }

    fn standard_packages(&mut self) -> Result<HashSet<String>, SourceError> {
        Ok(self.stdlib.clone())
    }

    fn finish(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_records_consumed_once() {
        let mut source = ReplaySource::from_text("a _\n", "a", ["fmt"]);
        assert!(source.records().is_ok());
        assert!(matches!(source.records(), Err(SourceError::StreamConsumed)));
    }

    #[test]
    fn test_open_files() {
        let dir = tempfile::tempdir().unwrap();
        let records = dir.path().join("records.txt");
        let std_list = dir.path().join("std.txt");
        fs::write(&records, "a _ fmt b\nb _\n").unwrap();
        let mut std_file = File::create(&std_list).unwrap();
        writeln!(std_file, "fmt").unwrap();
        writeln!(std_file, "os").unwrap();

        let mut source = ReplaySource::open(&records, Some("a"), Some(&std_list)).unwrap();
        let mut content = String::new();
        for line in source.records().unwrap().lines() {
            content.push_str(&line.unwrap());
            content.push('\n');
        }
        assert_eq!(content, "a _ fmt b\nb _\n");
        assert_eq!(source.standard_packages().unwrap().len(), 2);
        assert_eq!(source.self_identity().unwrap().package, "a");
    }

    #[test]
    fn test_open_missing_file() {
        let err = ReplaySource::open(Path::new("/definitely/not/here.txt"), None, None)
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
