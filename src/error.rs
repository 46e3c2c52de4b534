//! Error types for showdeps.
//!
//! Each stage of the load pipeline has its own error enum; they all convert
//! into [`ShowdepsError`], which is what the pipeline returns. The binary
//! wraps that in `anyhow` for context.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::graph::GraphError;
use crate::parser::ParseError;

/// Top-level error type for the load pipeline.
#[derive(Debug, Error)]
pub enum ShowdepsError {
    /// Configuration errors (bad rule patterns, bad colors, unreadable files)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed or unreadable record stream
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The external `go list` producer failed
    #[error("Package source error: {0}")]
    Source(#[from] SourceError),

    /// Graph traversal errors
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Other I/O errors (terminal, export output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors. All of them are raised before any graph work.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A classification rule pattern failed to compile
    #[error("invalid rule pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A classification rule color is not a known color or `#rrggbb`
    #[error("invalid rule color {color:?} for rule {label:?}")]
    InvalidColor { color: String, label: String },

    /// A configuration file given on the command line does not exist
    #[error("config file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    /// The configuration sources could not be merged or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Errors from the external package metadata producer.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The command could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited unsuccessfully
    #[error("`{command}` exited with {status}: {stderr}")]
    Exited {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// A replay file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The stream was requested twice
    #[error("record stream already consumed")]
    StreamConsumed,
}

/// Result alias for the load pipeline.
pub type Result<T> = std::result::Result<T, ShowdepsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: ShowdepsError = ConfigError::InvalidColor {
            color: "nope".to_string(),
            label: "Internal".to_string(),
        }
        .into();
        assert!(matches!(err, ShowdepsError::Config(_)));
        assert!(err.to_string().contains("\"nope\""));
    }

    #[test]
    fn test_graph_error_is_transparent() {
        let err: ShowdepsError = GraphError::CycleDetected {
            path: vec!["a".to_string(), "a".to_string()],
        }
        .into();
        assert_eq!(
            err.to_string(),
            "import cycle detected while resolving path: a <- a"
        );
    }

    #[test]
    fn test_source_error_message() {
        let err = SourceError::StreamConsumed;
        assert_eq!(err.to_string(), "record stream already consumed");
    }
}
