use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Serialized, Yaml},
    Figment,
};
use serde::Serialize;
use tracing::debug;

use super::Config;
use crate::error::ConfigError;

/// Default configuration file name, looked up in the working directory and
/// then in the home directory.
pub const CONFIG_BASENAME: &str = ".showdeps.yml";

/// Prefix of environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "SHOWDEPS_";

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_path: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
}

/// Finds the configuration file to use when none was given explicitly.
///
/// The working directory wins over the home directory: when both files
/// exist the per-user one is not read at all, rather than being the last
/// match that takes effect.
pub fn find_config_file(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    std::iter::once(cwd)
        .chain(home)
        .map(|dir| dir.join(CONFIG_BASENAME))
        .find(|path| path.is_file())
}

impl Config {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// An explicit `config_path` must exist; the implicit lookup tolerates
    /// having no file at all.
    pub fn load(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
        }

        let config_file = config_path.map(Path::to_path_buf).or_else(|| {
            let cwd = std::env::current_dir().ok()?;
            find_config_file(&cwd, dirs::home_dir().as_deref())
        });

        Self::figment(config_file.as_deref())
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Builds the layered figment without command-line overrides.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = config_file {
            debug!(path = %path.display(), "using config file");
            figment = figment.merge(Yaml::file(path));
        }

        // SHOWDEPS_STRIP_PATH -> strip-path
        figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| key.as_str().to_ascii_lowercase().replace('_', "-").into()),
        )
    }
}
