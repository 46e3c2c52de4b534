//! showdeps - Terminal UI browser for the external dependencies of a Go module
//!
//! The import records reported by `go list -deps` are parsed into an import
//! graph, reduced to the packages outside the analyzed module, classified by
//! user-defined rules and shown in a terminal browser together with the
//! import chain that pulls each package in.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod graph;
pub mod logger;
pub mod parser;
pub mod progress;
pub mod source;
pub mod ui;
