//! Configuration loading.
//!
//! Settings come from a TOML file and the command line, in that order of
//! precedence (command line wins for the scope, and adds wrappers):
//!
//! ```toml
//! scope = "github.com/acme/service"
//! wrappers = ["func github.com/cockroachdb/errors.WithStack(err error) error"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use wrapck_analysis::{PolicyError, WrapPolicy};

/// Configuration file read when none is given explicitly.
pub const DEFAULT_CONFIG: &str = "wrapck.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no analysis scope configured; set `scope` in wrapck.toml or pass --scope")]
    MissingScope,
}

impl From<PolicyError> for ConfigError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::MissingScope => ConfigError::MissingScope,
        }
    }
}

/// Contents of a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Package path prefix of the units to analyze.
    #[serde(default)]
    pub scope: Option<String>,
    /// Fully-qualified signatures of wrapping functions.
    #[serde(default)]
    pub wrappers: Vec<String>,
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a configuration file.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG`] in the
    /// working directory is read if present, and an empty configuration is
    /// used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "config loaded");
                Config::parse(&text, &path)
            }
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Config::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    /// Apply command-line overrides and build the policy.
    pub fn into_policy(
        self,
        scope: Option<String>,
        extra_wrappers: &[String],
    ) -> Result<WrapPolicy, ConfigError> {
        let scope = scope.or(self.scope).ok_or(ConfigError::MissingScope)?;
        let wrappers = self.wrappers.into_iter().chain(extra_wrappers.iter().cloned());
        Ok(WrapPolicy::new(scope, wrappers)?)
    }
}

#[cfg(test)]
mod tests;
