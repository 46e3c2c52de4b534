//! Dependency categories.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Serialize;

/// Display color for standard library packages.
pub const STDLIB_COLOR: &str = "#aaaaaa";
/// Display color for the catch-all category.
pub const VENDOR_COLOR: &str = "#9b59b6";

/// The classification bound to a dependency: label, display color and priority.
///
/// Higher priorities sort first in the dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    /// Human-readable label shown in the Info pane
    pub label: String,
    /// Display color, a color name or `#rrggbb`
    pub color: String,
    /// Sort priority, also used by the `0`-`9` quick filters
    pub priority: i32,
}

impl Category {
    /// Creates a new category.
    pub fn new(label: impl Into<String>, color: impl Into<String>, priority: i32) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            priority,
        }
    }

    /// Built-in category for packages in the Go standard distribution.
    pub fn standard_library() -> Self {
        Self::new("Standard library", STDLIB_COLOR, 0)
    }

    /// Built-in catch-all category.
    pub fn vendor() -> Self {
        Self::new("Vendor package", VENDOR_COLOR, 1)
    }

    /// Resolves the display color, falling back to white for unknown values.
    pub fn display_color(&self) -> Color {
        parse_color(&self.color).unwrap_or(Color::White)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.priority)
    }
}

/// Parses a color name or `#rrggbb` value.
pub fn parse_color(value: &str) -> Option<Color> {
    Color::from_str(value.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_priorities() {
        assert_eq!(Category::standard_library().priority, 0);
        assert_eq!(Category::vendor().priority, 1);
    }

    #[test]
    fn test_display_color_hex() {
        assert_eq!(
            Category::standard_library().display_color(),
            Color::Rgb(0xaa, 0xaa, 0xaa)
        );
        assert_eq!(Category::vendor().display_color(), Color::Rgb(0x9b, 0x59, 0xb6));
    }

    #[test]
    fn test_display_color_fallback() {
        let category = Category::new("Odd", "not-a-color", 3);
        assert_eq!(category.display_color(), Color::White);
    }

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("#00b14f"), Some(Color::Rgb(0, 0xb1, 0x4f)));
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::vendor().to_string(), "Vendor package (1)");
    }
}
