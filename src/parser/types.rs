//! Shared types for import record parsing.
//!
//! This module defines the records produced by `go list` and the
//! self-identification of the package being analyzed.

use std::fmt;

/// Root-module field value meaning "not part of any module".
pub const NO_MODULE: &str = "_";

/// One line of the `go list -deps` record stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// The package import path.
    pub package: String,

    /// The package's root module, `None` for the `_` sentinel.
    pub module: Option<String>,

    /// Direct imports of the package.
    pub imports: Vec<String>,
}

/// The package (and module, if any) the tool was started in.
///
/// Parsed from `<ownPackagePath>[ <ownModulePath>]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelfIdentity {
    /// Import path of the package in the working directory.
    pub package: String,

    /// Module path, when the package belongs to a module.
    pub module: Option<String>,
}

impl SelfIdentity {
    /// Parses the self-identification line.
    ///
    /// Surrounding whitespace is ignored and an empty module field is
    /// treated as absent.
    ///
    /// # Example
    ///
    /// ```
    /// use showdeps::parser::SelfIdentity;
    ///
    /// let id = SelfIdentity::parse("example.com/app/cmd example.com/app\n");
    /// assert_eq!(id.root(), "example.com/app");
    ///
    /// let id = SelfIdentity::parse("main");
    /// assert_eq!(id.root(), "main");
    /// ```
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let package = parts.next().unwrap_or_default().to_string();
        let module = parts.next().map(str::to_string);
        Self { package, module }
    }

    /// The analysis root: the module path when known, the package otherwise.
    pub fn root(&self) -> &str {
        self.module.as_deref().unwrap_or(&self.package)
    }

    /// Returns true when `path` names the analyzed package or its module.
    pub fn is_self(&self, path: &str) -> bool {
        path == self.package || self.module.as_deref() == Some(path)
    }
}

impl fmt::Display for SelfIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_identity_with_module() {
        let id = SelfIdentity::parse("example.com/app/cmd example.com/app");
        assert_eq!(id.package, "example.com/app/cmd");
        assert_eq!(id.module.as_deref(), Some("example.com/app"));
        assert!(id.is_self("example.com/app"));
        assert!(id.is_self("example.com/app/cmd"));
        assert!(!id.is_self("example.com/other"));
    }

    #[test]
    fn test_self_identity_without_module() {
        let id = SelfIdentity::parse("  a \n");
        assert_eq!(id.package, "a");
        assert!(id.module.is_none());
        assert_eq!(id.root(), "a");
        assert_eq!(id.to_string(), "a");
    }

    #[test]
    fn test_self_identity_empty() {
        let id = SelfIdentity::parse("");
        assert_eq!(id, SelfIdentity::default());
        assert_eq!(id.root(), "");
    }
}
