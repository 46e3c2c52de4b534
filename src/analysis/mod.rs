//! Dependency analysis for showdeps.
//!
//! Ties the stages together: the record stream is parsed into a forward
//! graph, reduced to the external set, classified and sorted, and the
//! inverted graph is built for import path lookups.

mod pipeline;

pub use pipeline::{load_dependencies, LoadedDeps};
