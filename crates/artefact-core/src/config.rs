//! Environment configuration for processes that host a lake.
//!
//! Libraries never read the environment on their own. Binaries resolve a
//! [`LakeConfig`] once at startup, either with [`LakeConfig::from_env`] or by
//! passing their own flag values to [`LakeConfig::from_env_with`].

use crate::error::{Error, Result};
use crate::observability::LogFormat;

/// Environment variable naming the lake root path.
pub const ENV_LAKE_ROOT: &str = "ARTEFACT_LAKE_ROOT";

/// Environment variable selecting the log format (`json` or `pretty`).
pub const ENV_LOG_FORMAT: &str = "ARTEFACT_LOG_FORMAT";

/// Lake location and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LakeConfig {
    /// Root path holding the `datasets/`, `models/` and `others/` namespaces.
    pub root: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl LakeConfig {
    /// Loads config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the lake root is missing or empty,
    /// or the log format is unknown.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Loads config with a custom environment source.
    ///
    /// This entry point is test-friendly and accepts a key lookup function.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the lake root is missing or empty,
    /// or the log format is unknown.
    pub fn from_env_with<F>(get_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = get_env(ENV_LAKE_ROOT)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| Error::configuration(format!("missing {ENV_LAKE_ROOT}")))?;

        let log_format = match get_env(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self { root, log_format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_root_and_defaults_format() {
        let config = LakeConfig::from_env_with(env(&[(ENV_LAKE_ROOT, "/data/lake")])).unwrap();
        assert_eq!(config.root, "/data/lake");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_json_format() {
        let config = LakeConfig::from_env_with(env(&[
            (ENV_LAKE_ROOT, "lake"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_root_is_configuration_error() {
        let err = LakeConfig::from_env_with(env(&[])).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = LakeConfig::from_env_with(env(&[(ENV_LAKE_ROOT, "  ")])).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = LakeConfig::from_env_with(env(&[
            (ENV_LAKE_ROOT, "lake"),
            (ENV_LOG_FORMAT, "xml"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
