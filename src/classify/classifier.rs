//! Ordered rule matching for dependency classification.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use super::category::{parse_color, Category};
use crate::error::ConfigError;

/// A user-declared classification rule.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pattern: Regex,
    category: Category,
}

impl ClassificationRule {
    /// Compiles a rule.
    ///
    /// # Errors
    ///
    /// Fails when the pattern is not a valid regular expression or the
    /// color cannot be parsed.
    pub fn compile(
        pattern: &str,
        label: &str,
        color: &str,
        priority: i32,
    ) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if parse_color(color).is_none() {
            return Err(ConfigError::InvalidColor {
                color: color.to_string(),
                label: label.to_string(),
            });
        }

        Ok(Self {
            pattern: regex,
            category: Category::new(label, color, priority),
        })
    }

    /// Returns true when the rule's pattern matches anywhere in `pkg`.
    pub fn matches(&self, pkg: &str) -> bool {
        self.pattern.is_match(pkg)
    }

    /// The category assigned on a match.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Assigns a [`Category`] to every package.
///
/// Precedence: custom rules in declared order, then standard library
/// membership, then the vendor catch-all.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use showdeps::classify::{ClassificationRule, Classifier};
///
/// let rules = vec![ClassificationRule::compile("^github.com/acme/", "Internal", "green", 5).unwrap()];
/// let stdlib = HashSet::from(["fmt".to_string()]);
/// let classifier = Classifier::new(rules, stdlib);
///
/// assert_eq!(classifier.classify("github.com/acme/log").label, "Internal");
/// assert_eq!(classifier.classify("fmt").label, "Standard library");
/// assert_eq!(classifier.classify("github.com/pkg/errors").label, "Vendor package");
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
    stdlib: HashSet<String>,
    standard: Category,
    vendor: Category,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Vec::new(), HashSet::new())
    }
}

impl Classifier {
    /// Creates a classifier from compiled rules and the standard library set.
    pub fn new(rules: Vec<ClassificationRule>, stdlib: HashSet<String>) -> Self {
        debug!(rules = rules.len(), stdlib = stdlib.len(), "classifier ready");
        Self {
            rules,
            stdlib,
            standard: Category::standard_library(),
            vendor: Category::vendor(),
        }
    }

    /// Classifies one package.
    pub fn classify(&self, pkg: &str) -> &Category {
        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(pkg)) {
            return rule.category();
        }
        if self.stdlib.contains(pkg) {
            return &self.standard;
        }
        &self.vendor
    }
}
