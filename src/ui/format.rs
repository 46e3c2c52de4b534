//! Display formatting for package paths.

use std::borrow::Cow;

/// How package paths are shown on screen.
///
/// Only the displayed string changes; lookups always use the full path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Strip `path_prefix` from displayed names
    pub strip_path: bool,
    /// Prefix to strip
    pub path_prefix: String,
}

impl DisplayOptions {
    /// Returns the display string for `pkg`.
    ///
    /// When stripping is enabled the first occurrence of the prefix is
    /// removed, wherever it appears in the path.
    pub fn display_name<'a>(&self, pkg: &'a str) -> Cow<'a, str> {
        if self.strip_path && !self.path_prefix.is_empty() && pkg.contains(&self.path_prefix) {
            Cow::Owned(pkg.replacen(&self.path_prefix, "", 1))
        } else {
            Cow::Borrowed(pkg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripping(prefix: &str) -> DisplayOptions {
        DisplayOptions {
            strip_path: true,
            path_prefix: prefix.to_string(),
        }
    }

    #[test]
    fn test_disabled_keeps_path() {
        let options = DisplayOptions {
            strip_path: false,
            path_prefix: "github.com/".to_string(),
        };
        assert_eq!(options.display_name("github.com/pkg/errors"), "github.com/pkg/errors");
    }

    #[test]
    fn test_strips_first_occurrence_only() {
        let options = stripping("x/");
        assert_eq!(options.display_name("x/y/x/z"), "y/x/z");
    }

    #[test]
    fn test_prefix_not_at_start() {
        let options = stripping("acme/");
        assert_eq!(options.display_name("github.com/acme/tool"), "github.com/tool");
    }

    #[test]
    fn test_empty_prefix_is_noop() {
        let options = stripping("");
        assert!(matches!(options.display_name("fmt"), Cow::Borrowed("fmt")));
    }
}
