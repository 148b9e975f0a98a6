//! Settings Loader
//!
//! Builds [`TestSettings`] from layered sources using the `config` crate:
//! an optional settings file, `SUITE_`-prefixed environment variables, then
//! explicit overrides (highest precedence).

use super::error::{ConfigResult, ConfigurationError};
use super::TestSettings;
use crate::constants::settings;
use config::{Config, Environment, File};
use std::path::PathBuf;
use tracing::debug;

/// Layered settings loader
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    file_required: bool,
    use_environment: bool,
    overrides: Vec<(String, String)>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from(settings::DEFAULT_SETTINGS_FILE)),
            file_required: false,
            use_environment: true,
            overrides: Vec::new(),
        }
    }
}

impl SettingsLoader {
    /// Loader reading `suite.toml` if present plus the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader with no file and no environment; only explicit overrides apply
    pub fn empty() -> Self {
        Self {
            file: None,
            file_required: false,
            use_environment: false,
            overrides: Vec::new(),
        }
    }

    /// Read settings from an explicit file, which must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self.file_required = true;
        self
    }

    pub fn without_environment(mut self) -> Self {
        self.use_environment = false;
        self
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Merge all sources into a [`TestSettings`]
    pub fn load(self) -> ConfigResult<TestSettings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if self.file_required && !path.is_file() {
                return Err(ConfigurationError::file_read_error(
                    path.display().to_string(),
                    "file does not exist or is not a regular file",
                ));
            }
            debug!(file = %path.display(), required = self.file_required, "Adding settings file source");
            builder = builder.add_source(File::from(path.clone()).required(self.file_required));
        }

        if self.use_environment {
            builder = builder.add_source(
                Environment::with_prefix(settings::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(settings::ENV_SEPARATOR),
            );
        }

        for (key, value) in &self.overrides {
            builder = builder
                .set_override(key.as_str(), value.as_str())
                .map_err(ConfigurationError::settings_unreadable)?;
        }

        let config = builder
            .build()
            .map_err(ConfigurationError::settings_unreadable)?;

        Ok(TestSettings::from_config(config))
    }
}
