//! Parser module for showdeps.
//!
//! This module turns the text produced by `go list` into the data the rest
//! of the pipeline works on.
//!
//! # Supported Formats
//!
//! - **Import records**: `<package> <rootModule|_> <import>...`, one per line
//! - **Self identification**: `<package>[ <module>]`
//!
//! # Example
//!
//! ```
//! use showdeps::parser::parse_records_str;
//!
//! let parsed = parse_records_str("a _ b c\nb _\nc _\n").unwrap();
//! assert_eq!(parsed.forward.key_count(), 3);
//! assert_eq!(parsed.forward.edge_count(), 2);
//! ```

pub mod records;
pub mod types;

pub use records::{
    parse_record, parse_records, parse_records_str, ParseError, ParseResult, ParsedRecords,
};
pub use types::{ImportRecord, SelfIdentity, NO_MODULE};
