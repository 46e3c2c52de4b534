//! Configuration for showdeps.
//!
//! Settings come from, in increasing priority: built-in defaults, a YAML
//! file (`.showdeps.yml`), `SHOWDEPS_*` environment variables, and
//! command-line flags.
//!
//! ```yaml
//! strip-path: true
//! path-prefix: github.com/acme/
//! rules:
//!   - regex: "github.com/acme/"
//!     label: Internal
//!     color: "#2ecc71"
//!     priority: 5
//! ```

mod loading;

use serde::{Deserialize, Serialize};

use crate::classify::ClassificationRule;
use crate::error::ConfigError;
use crate::ui::DisplayOptions;

pub use loading::{find_config_file, ConfigOverrides, CONFIG_BASENAME, ENV_PREFIX};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Strip `path_prefix` from displayed package names
    pub strip_path: bool,
    /// Prefix removed from displayed package names when `strip_path` is set
    pub path_prefix: String,
    /// Custom classification rules, evaluated in order
    pub rules: Vec<RuleConfig>,
}

/// A classification rule as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Regular expression matched anywhere in the package path
    pub regex: String,
    /// Category label
    pub label: String,
    /// Sort priority; higher sorts first
    #[serde(default)]
    pub priority: i32,
    /// Display color, a color name or `#rrggbb`
    #[serde(default = "default_rule_color")]
    pub color: String,
}

fn default_rule_color() -> String {
    "#ffffff".to_string()
}

impl Config {
    /// Compiles the configured rules, in declaration order.
    ///
    /// # Errors
    ///
    /// Fails on the first rule whose pattern or color is invalid.
    pub fn compile_rules(&self) -> Result<Vec<ClassificationRule>, ConfigError> {
        self.rules
            .iter()
            .map(|rule| {
                ClassificationRule::compile(&rule.regex, &rule.label, &rule.color, rule.priority)
            })
            .collect()
    }

    /// Display formatting options for the UI.
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            strip_path: self.strip_path,
            path_prefix: self.path_prefix.clone(),
        }
    }
}
