//! Module membership tracking.
//!
//! Records which packages belong to a Go module other than themselves, and
//! the children of every module root seen in the record stream.

use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Module roots, their member packages, and the membership lookup.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    /// Module root → packages declaring it as their root (the root itself excluded)
    children: BTreeMap<String, BTreeSet<String>>,
    /// Packages that are members of some other root module
    members: HashSet<String>,
}

impl ModuleIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `package` declares `module` as its root module.
    ///
    /// The module becomes a known root either way; `package` is only marked
    /// as a member when it differs from the module path.
    pub fn register(&mut self, package: &str, module: &str) {
        let children = self.children.entry(module.to_string()).or_default();
        if package != module {
            children.insert(package.to_string());
            self.members.insert(package.to_string());
        }
    }

    /// Returns true when `package` belongs to a module other than itself.
    pub fn is_member(&self, package: &str) -> bool {
        self.members.contains(package)
    }

    /// Iterates over every known module root, in lexical order.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Returns the member packages of a module root, in lexical order.
    ///
    /// Empty for unknown roots and for roots without other packages.
    pub fn children_of(&self, module: &str) -> Vec<&str> {
        self.children
            .get(module)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the number of known module roots.
    pub fn root_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the number of member packages.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
