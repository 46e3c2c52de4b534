//! Graph module for package import relationships.
//!
//! This module provides the [`ImportGraph`] used for both the forward import
//! relation and its inversion, the [`ModuleIndex`] of module membership, the
//! external-set [`flatten_external`] reduction and the [`resolve_path`]
//! backward walk.
//!
//! # Example
//!
//! ```rust
//! use showdeps::graph::{resolve_path, ImportGraph};
//!
//! let mut graph = ImportGraph::new();
//! graph.add_package("example.com/app");
//! graph.add_edge("example.com/app", "github.com/pkg/errors");
//!
//! let inverted = graph.inverted();
//! let path = resolve_path(&inverted, "github.com/pkg/errors").unwrap();
//! assert_eq!(path, vec!["github.com/pkg/errors", "example.com/app"]);
//! ```

mod flatten;
mod import_graph;
mod modules;
mod path;

pub use flatten::flatten_external;
pub use import_graph::{CycleInfo, ImportGraph, PackageNode};
pub use modules::ModuleIndex;
pub use path::{resolve_path, GraphError};
