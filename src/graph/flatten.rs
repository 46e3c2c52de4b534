//! Reduction of the forward graph to the external dependency set.

use std::collections::BTreeSet;

use super::{ImportGraph, ModuleIndex};

/// Collects the packages that are external to the analyzed module tree.
///
/// The result holds every import target that is not a module member, plus
/// every known module root (so a module whose packages were all scanned as
/// members still shows up once). The empty path is never included. The
/// analysis root is *not* removed here; callers filter it by identity.
///
/// # Example
///
/// ```rust
/// use showdeps::graph::{flatten_external, ImportGraph, ModuleIndex};
///
/// let mut forward = ImportGraph::new();
/// forward.add_package("app");
/// forward.add_edge("app", "fmt");
/// forward.add_edge("app", "github.com/pkg/errors/sub");
///
/// let mut modules = ModuleIndex::new();
/// modules.register("github.com/pkg/errors/sub", "github.com/pkg/errors");
///
/// let flat: Vec<_> = flatten_external(&forward, &modules).into_iter().collect();
/// assert_eq!(flat, vec!["fmt", "github.com/pkg/errors"]);
/// ```
pub fn flatten_external(forward: &ImportGraph, modules: &ModuleIndex) -> BTreeSet<String> {
    let mut flat: BTreeSet<String> = forward
        .import_targets()
        .into_iter()
        .filter(|pkg| !modules.is_member(pkg))
        .map(str::to_string)
        .collect();

    flat.extend(modules.roots().map(str::to_string));
    flat.remove("");
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_are_excluded() {
        let mut forward = ImportGraph::new();
        forward.add_package("a");
        forward.add_edge("a", "b");
        forward.add_edge("a", "c");

        let mut modules = ModuleIndex::new();
        modules.register("b", "modX");

        let flat = flatten_external(&forward, &modules);
        assert!(!flat.contains("b"));
        assert!(flat.contains("c"));
        assert!(flat.contains("modX"));
    }

    #[test]
    fn test_non_target_keys_are_excluded() {
        let mut forward = ImportGraph::new();
        forward.add_package("root");
        forward.add_package("lonely");
        forward.add_edge("root", "dep");

        let flat = flatten_external(&forward, &ModuleIndex::new());
        assert_eq!(flat.into_iter().collect::<Vec<_>>(), vec!["dep"]);
    }

    #[test]
    fn test_module_root_without_imports_is_included() {
        let forward = ImportGraph::new();
        let mut modules = ModuleIndex::new();
        modules.register("example.com/mod", "example.com/mod");

        let flat = flatten_external(&forward, &modules);
        assert!(flat.contains("example.com/mod"));
    }

    #[test]
    fn test_no_member_ever_flattened() {
        let mut forward = ImportGraph::new();
        let mut modules = ModuleIndex::new();
        for i in 0..20 {
            let pkg = format!("m{}/p{}", i % 3, i);
            forward.add_package(&pkg);
            forward.add_edge(&pkg, &format!("m{}/p{}", (i + 1) % 3, i + 1));
            forward.add_edge(&pkg, &format!("ext{}", i % 5));
            if i % 2 == 0 {
                modules.register(&pkg, &format!("m{}", i % 3));
            }
        }

        let flat = flatten_external(&forward, &modules);
        for pkg in &flat {
            assert!(!modules.is_member(pkg), "{pkg} is a module member");
        }
    }

    #[test]
    fn test_empty_path_is_dropped() {
        let mut forward = ImportGraph::new();
        forward.add_package("a");
        forward.add_edge("a", "");

        assert!(flatten_external(&forward, &ModuleIndex::new()).is_empty());
    }
}
