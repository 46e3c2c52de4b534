//! Producers of package metadata.
//!
//! The load pipeline needs three things from the outside world: the import
//! record stream, the self identification of the analyzed package, and the
//! standard library package set. [`GoListSource`] gets them from the `go`
//! tool; [`ReplaySource`] reads previously captured output.

mod go_list;
mod replay;

use std::collections::HashSet;
use std::io::BufRead;

use crate::error::SourceError;
use crate::parser::SelfIdentity;

pub use go_list::{GoListSource, RECORD_FORMAT, SELF_FORMAT};
pub use replay::ReplaySource;

/// A provider of the record stream and its companion queries.
pub trait PackageSource {
    /// Starts the import record stream. Can only be called once.
    fn records(&mut self) -> Result<Box<dyn BufRead + Send>, SourceError>;

    /// Identifies the package (and module) being analyzed.
    fn self_identity(&mut self) -> Result<SelfIdentity, SourceError>;

    /// Lists the packages of the standard distribution.
    fn standard_packages(&mut self) -> Result<HashSet<String>, SourceError>;

    /// Waits for the record producer and reports how it exited.
    fn finish(&mut self) -> Result<(), SourceError>;
}

/// Collects non-empty trimmed lines into a set.
pub(crate) fn line_set(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_set() {
        let set = line_set("fmt\n  os \n\nnet/http\nfmt\n");
        assert_eq!(set.len(), 3);
        assert!(set.contains("os"));
        assert!(set.contains("net/http"));
    }
}
