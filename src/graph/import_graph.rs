//! Import graph implementation using petgraph.
//!
//! Provides a directed graph of package import relationships. The same type
//! backs both the forward graph (package → packages it imports) and its
//! inversion (package → packages that import it).

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// A package in the import graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    /// Package import path (e.g., "github.com/pkg/errors")
    pub path: String,
    /// Whether a record for this package was scanned from the stream.
    ///
    /// Packages that only ever appear as import targets are nodes but not keys.
    pub scanned: bool,
}

impl PackageNode {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            scanned: false,
        }
    }
}

/// A directed graph of package imports.
///
/// Edges are a set: adding the same `from → to` pair twice keeps a single
/// edge. Self-loops are stored like any other edge.
///
/// # Example
///
/// ```rust
/// use showdeps::graph::ImportGraph;
///
/// let mut graph = ImportGraph::new();
/// graph.add_package("example.com/app");
/// graph.add_edge("example.com/app", "fmt");
/// graph.add_edge("example.com/app", "github.com/pkg/errors");
///
/// assert_eq!(graph.key_count(), 1);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    /// The underlying directed graph
    graph: DiGraph<PackageNode, ()>,
    /// Maps package paths to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    /// Creates a new empty import graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    fn ensure_node(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(path) {
            return idx;
        }

        let idx = self.graph.add_node(PackageNode::new(path));
        self.node_indices.insert(path.to_string(), idx);
        idx
    }

    /// Registers `path` as a key of the graph, even if it imports nothing.
    ///
    /// Returns the `NodeIndex` of the added or existing node.
    pub fn add_package(&mut self, path: &str) -> NodeIndex {
        let idx = self.ensure_node(path);
        self.graph[idx].scanned = true;
        idx
    }

    /// Adds an import edge from `from` to `to`, creating nodes as needed.
    ///
    /// Returns `true` if the edge is new, `false` if it was already present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use showdeps::graph::ImportGraph;
    ///
    /// let mut graph = ImportGraph::new();
    /// assert!(graph.add_edge("a", "b"));
    /// assert!(!graph.add_edge("a", "b"));
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return false;
        }
        self.graph.add_edge(from_idx, to_idx, ());
        true
    }

    /// Gets a node by package path.
    pub fn get_node(&self, path: &str) -> Option<&PackageNode> {
        self.node_indices
            .get(path)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Returns true if the package is a node of the graph.
    pub fn contains(&self, path: &str) -> bool {
        self.node_indices.contains_key(path)
    }

    /// Returns true if a record for the package was scanned.
    pub fn is_key(&self, path: &str) -> bool {
        self.get_node(path).is_some_and(|node| node.scanned)
    }

    /// Iterates over the scanned packages, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_weights()
            .filter(|node| node.scanned)
            .map(|node| node.path.as_str())
    }

    /// Gets the outgoing neighbours of a package, in lexical order.
    ///
    /// In a forward graph these are the packages `path` imports; in an
    /// inverted graph they are the packages importing `path`.
    pub fn successors(&self, path: &str) -> BTreeSet<&str> {
        let Some(&idx) = self.node_indices.get(path) else {
            return BTreeSet::new();
        };

        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge| self.graph.node_weight(edge.target()))
            .map(|node| node.path.as_str())
            .collect()
    }

    /// Returns the lexically smallest outgoing neighbour, if any.
    pub fn first_successor(&self, path: &str) -> Option<&str> {
        let &idx = self.node_indices.get(path)?;

        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n))
            .map(|node| node.path.as_str())
            .min()
    }

    /// Iterates over every edge as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].path.as_str(),
                self.graph[edge.target()].path.as_str(),
            )
        })
    }

    /// Returns every package that is the target of at least one edge.
    pub fn import_targets(&self) -> BTreeSet<&str> {
        self.graph
            .edge_references()
            .map(|edge| self.graph[edge.target()].path.as_str())
            .collect()
    }

    /// Builds the inverted graph: for every edge `a → b`, an edge `b → a`.
    ///
    /// Nodes keep their `scanned` flag, so inverting twice yields a graph
    /// with the same keys and the same edge set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use showdeps::graph::ImportGraph;
    ///
    /// let mut forward = ImportGraph::new();
    /// forward.add_package("app");
    /// forward.add_edge("app", "lib");
    ///
    /// let inverted = forward.inverted();
    /// assert!(inverted.successors("lib").contains("app"));
    /// assert_eq!(inverted.edge_count(), forward.edge_count());
    /// ```
    pub fn inverted(&self) -> ImportGraph {
        let mut inverted = ImportGraph::with_capacity(self.node_count(), self.edge_count());

        for node in self.graph.node_weights() {
            let idx = inverted.ensure_node(&node.path);
            inverted.graph[idx].scanned = node.scanned;
        }
        for (from, to) in self.edges() {
            inverted.add_edge(to, from);
        }

        inverted
    }

    /// Detects every import cycle in the graph.
    ///
    /// A strongly connected component counts as a cycle when it has more
    /// than one node, or a single node with a self-loop.
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            let is_cycle = scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]);
            if !is_cycle {
                continue;
            }
            let mut nodes: Vec<String> = scc
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx))
                .map(|node| node.path.clone())
                .collect();
            nodes.sort();
            cycles.push(CycleInfo { nodes });
        }

        cycles.sort_by(|a, b| a.nodes.cmp(&b.nodes));
        cycles
    }

    /// Returns the number of nodes (keys and import-only targets).
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of scanned packages.
    pub fn key_count(&self) -> usize {
        self.keys().count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

/// Information about an import cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// Packages participating in the cycle, sorted
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a string representation of the cycle, closing back on the first node.
    pub fn cycle_path(&self) -> String {
        match self.nodes.first() {
            Some(first) => format!("{} -> {}", self.nodes.join(" -> "), first),
            None => String::new(),
        }
    }

    /// Returns the number of packages in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
