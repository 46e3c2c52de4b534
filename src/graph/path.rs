//! Import path reconstruction over the inverted graph.

use std::collections::HashSet;

use super::ImportGraph;

/// Errors raised while walking the import graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The backward walk revisited a package.
    ///
    /// `path` holds the chain walked so far, ending at the repeated package.
    #[error("import cycle detected while resolving path: {}", .path.join(" <- "))]
    CycleDetected { path: Vec<String> },
}

impl GraphError {
    /// Returns the partial path carried by the error.
    pub fn partial_path(&self) -> &[String] {
        match self {
            GraphError::CycleDetected { path } => path,
        }
    }
}

/// Walks backwards from `target` to a package nothing imports.
///
/// The returned path starts at `target` and ends at a package without
/// importers in `inverted`. When a package has several importers the
/// lexically smallest one is followed. A target that is not in the graph
/// resolves to `[target]`.
///
/// # Errors
///
/// Returns [`GraphError::CycleDetected`] when the walk reaches a package it
/// already visited.
///
/// # Example
///
/// ```rust
/// use showdeps::graph::{resolve_path, ImportGraph};
///
/// let mut forward = ImportGraph::new();
/// forward.add_edge("app", "lib");
/// forward.add_edge("lib", "dep");
///
/// let path = resolve_path(&forward.inverted(), "dep").unwrap();
/// assert_eq!(path, vec!["dep", "lib", "app"]);
/// ```
pub fn resolve_path(inverted: &ImportGraph, target: &str) -> Result<Vec<String>, GraphError> {
    let mut path = vec![target.to_string()];
    let mut visited: HashSet<&str> = HashSet::from([target]);
    let mut current = target;

    while let Some(next) = inverted.first_successor(current) {
        path.push(next.to_string());
        if !visited.insert(next) {
            return Err(GraphError::CycleDetected { path });
        }
        current = next;
    }

    Ok(path)
}
