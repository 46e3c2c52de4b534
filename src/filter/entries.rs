//! Classified dependency entries and their visibility flags.

use std::cmp::Ordering;

use crate::classify::{Category, Classifier};

/// One external dependency in the display list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepEntry {
    /// Package import path
    pub package: String,
    /// Category bound at classification time
    pub category: Category,
    /// Whether the current filter shows this entry
    pub visible: bool,
}

impl DepEntry {
    /// Creates a visible entry.
    pub fn new(package: impl Into<String>, category: Category) -> Self {
        Self {
            package: package.into(),
            category,
            visible: true,
        }
    }

    /// Display ordering: descending priority, then ascending package path.
    pub fn display_order(&self, other: &Self) -> Ordering {
        other
            .category
            .priority
            .cmp(&self.category.priority)
            .then_with(|| self.package.cmp(&other.package))
    }
}

/// The classified dependency list, kept in display order.
///
/// Filtering only ever toggles `visible`; entries are never added, removed
/// or reordered after construction.
///
/// # Example
///
/// ```
/// use showdeps::classify::Classifier;
/// use showdeps::filter::EntryList;
///
/// let classifier = Classifier::default();
/// let mut entries = EntryList::classify(["b", "a", "ab"], &classifier);
///
/// entries.filter_by_substring("a");
/// let visible: Vec<_> = entries.visible().map(|e| e.package.as_str()).collect();
/// assert_eq!(visible, vec!["a", "ab"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<DepEntry>,
}

impl EntryList {
    /// Builds the list from already-classified entries, sorting them.
    pub fn new(mut entries: Vec<DepEntry>) -> Self {
        entries.sort_by(DepEntry::display_order);
        Self { entries }
    }

    /// Classifies every package and builds the sorted list.
    pub fn classify<I, S>(packages: I, classifier: &Classifier) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = packages
            .into_iter()
            .map(|pkg| {
                let pkg = pkg.into();
                let category = classifier.classify(&pkg).clone();
                DepEntry::new(pkg, category)
            })
            .collect();
        Self::new(entries)
    }

    /// Shows entries whose package path contains `query`.
    ///
    /// An empty query shows everything.
    pub fn filter_by_substring(&mut self, query: &str) {
        for entry in &mut self.entries {
            entry.visible = entry.package.contains(query);
        }
    }

    /// Shows entries whose category priority equals `priority`.
    pub fn filter_by_priority(&mut self, priority: i32) {
        for entry in &mut self.entries {
            entry.visible = entry.category.priority == priority;
        }
    }

    /// Makes every entry visible again.
    pub fn reset(&mut self) {
        self.filter_by_substring("");
    }

    /// Iterates over visible entries in display order.
    pub fn visible(&self) -> impl Iterator<Item = &DepEntry> {
        self.entries.iter().filter(|entry| entry.visible)
    }

    /// Returns the `index`-th visible entry.
    pub fn visible_at(&self, index: usize) -> Option<&DepEntry> {
        self.visible().nth(index)
    }

    /// Number of visible entries.
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Iterates over all entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &DepEntry> {
        self.entries.iter()
    }

    /// Looks up the category of a package in the list.
    pub fn category_of(&self, package: &str) -> Option<&Category> {
        self.entries
            .iter()
            .find(|entry| entry.package == package)
            .map(|entry| &entry.category)
    }

    /// Distinct priorities present in the list, highest first.
    pub fn priorities(&self) -> Vec<i32> {
        let mut priorities: Vec<i32> = self.entries.iter().map(|e| e.category.priority).collect();
        priorities.sort_unstable_by(|a, b| b.cmp(a));
        priorities.dedup();
        priorities
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassificationRule;
    use std::collections::HashSet;

    fn sample() -> EntryList {
        let rules = vec![ClassificationRule::compile("acme", "Acme", "green", 5).unwrap()];
        let stdlib = HashSet::from(["fmt".to_string(), "os".to_string()]);
        let classifier = Classifier::new(rules, stdlib);
        EntryList::classify(
            ["os", "github.com/pkg/errors", "fmt", "github.com/acme/log", "golang.org/x/sync"],
            &classifier,
        )
    }

    fn visible_names(list: &EntryList) -> Vec<&str> {
        list.visible().map(|e| e.package.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_priority_then_path() {
        let list = sample();
        let names: Vec<_> = list.iter().map(|e| e.package.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "github.com/acme/log",
                "github.com/pkg/errors",
                "golang.org/x/sync",
                "fmt",
                "os",
            ]
        );
    }

    #[test]
    fn test_all_visible_on_construction() {
        let list = sample();
        assert_eq!(list.visible_count(), list.len());
    }

    #[test]
    fn test_filter_by_substring() {
        let mut list = sample();
        list.filter_by_substring("github.com");
        assert_eq!(visible_names(&list), vec!["github.com/acme/log", "github.com/pkg/errors"]);
    }

    #[test]
    fn test_filter_unique_substring_yields_one() {
        let mut list = sample();
        list.filter_by_substring("x/sync");
        assert_eq!(visible_names(&list), vec!["golang.org/x/sync"]);
    }

    #[test]
    fn test_empty_substring_restores_all() {
        let mut list = sample();
        list.filter_by_priority(0);
        assert_eq!(list.visible_count(), 2);

        list.filter_by_substring("");
        assert_eq!(list.visible_count(), list.len());
    }

    #[test]
    fn test_filter_by_priority() {
        let mut list = sample();
        list.filter_by_priority(1);
        assert_eq!(visible_names(&list), vec!["github.com/pkg/errors", "golang.org/x/sync"]);

        list.filter_by_priority(9);
        assert_eq!(list.visible_count(), 0);
    }

    #[test]
    fn test_filters_do_not_accumulate() {
        let mut list = sample();
        list.filter_by_substring("github.com");
        list.filter_by_priority(0);
        assert_eq!(visible_names(&list), vec!["fmt", "os"]);

        list.reset();
        assert_eq!(list.visible_count(), 5);
    }

    #[test]
    fn test_visible_at() {
        let mut list = sample();
        list.filter_by_priority(0);
        assert_eq!(list.visible_at(1).map(|e| e.package.as_str()), Some("os"));
        assert!(list.visible_at(2).is_none());
    }

    #[test]
    fn test_category_of_and_priorities() {
        let list = sample();
        assert_eq!(list.category_of("fmt").map(|c| c.priority), Some(0));
        assert!(list.category_of("missing").is_none());
        assert_eq!(list.priorities(), vec![5, 1, 0]);
    }
}
