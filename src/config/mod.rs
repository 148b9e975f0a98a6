//! # Suite Configuration
//!
//! Reads the test settings once at suite start and resolves them into an
//! immutable [`ResolvedConfig`]: which backend mode the query engine runs in,
//! which connection hints reach the search cluster, and where the local test
//! artifacts live.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hive_search_suite::config::{resolve, TestSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = TestSettings::load()?;
//! let config = resolve(&settings)?;
//!
//! if config.mode.is_local() {
//!     println!("running against the embedded engine");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{artifacts, settings as keys, table};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::SettingsLoader;

/// Key-value settings source backing a suite run
#[derive(Debug, Clone, Default)]
pub struct TestSettings {
    inner: config::Config,
}

impl TestSettings {
    /// Load from `suite.toml` (if present) and `SUITE_*` environment variables
    pub fn load() -> ConfigResult<Self> {
        SettingsLoader::new().load()
    }

    /// Build settings from explicit pairs only, ignoring files and the environment
    pub fn from_pairs<I, K, V>(pairs: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(SettingsLoader::empty(), |loader, (key, value)| {
                loader.with_override(key, value)
            })
            .load()
    }

    pub fn from_config(inner: config::Config) -> Self {
        Self { inner }
    }

    /// Look up a string setting; `Ok(None)` when the key is absent
    pub fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        match self.inner.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(config::ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(ConfigurationError::invalid_value(
                key,
                "<unreadable>",
                e.to_string(),
            )),
        }
    }

    /// Look up a boolean setting; `Ok(None)` when the key is absent
    pub fn get_bool(&self, key: &str) -> ConfigResult<Option<bool>> {
        match self.inner.get_bool(key) {
            Ok(value) => Ok(Some(value)),
            Err(config::ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(ConfigurationError::invalid_value(
                key,
                "<non-boolean>",
                e.to_string(),
            )),
        }
    }
}

/// Where the query engine runs for this suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionMode {
    /// In-process engine; no distributed storage, no connection hints
    Local,
    /// Client against a separately deployed cluster
    Remote { target: String },
}

impl ExecutionMode {
    /// Map the raw mode selector onto a mode. Absent or `local` means local;
    /// any other value, including an empty one, names the remote target.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            None | Some(keys::LOCAL_MODE) => Self::Local,
            Some(target) => Self::Remote {
                target: target.to_string(),
            },
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    pub fn is_remote(&self) -> bool {
        !self.is_local()
    }

    /// Remote target identifier, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Local => None,
            Self::Remote { target } => Some(target),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote { target } => write!(f, "remote({target})"),
        }
    }
}

/// Search-cluster coordinates embedded into remote-mode table definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionHints {
    pub host: Option<String>,
    pub port: Option<String>,
}

impl ConnectionHints {
    /// Host exactly as configured, `None` when absent or only whitespace
    pub fn host_with_text(&self) -> Option<&str> {
        self.host
            .as_deref()
            .filter(|host| !host.trim().is_empty())
    }

    /// Port as configured, empty when unset
    pub fn port_or_empty(&self) -> &str {
        self.port.as_deref().unwrap_or("")
    }
}

/// Local artifact locations copied into distributed storage in remote mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSettings {
    pub support_artifact: PathBuf,
    pub data_artifact: PathBuf,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            support_artifact: PathBuf::from(artifacts::DEFAULT_SUPPORT_ARTIFACT),
            data_artifact: PathBuf::from(artifacts::DEFAULT_DATA_ARTIFACT),
        }
    }
}

/// Immutable view of the settings for one suite run
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub mode: ExecutionMode,
    pub hints: ConnectionHints,
    pub storage_handler: String,
    /// Drop `'port'=''` from remote table definitions instead of emitting it
    pub omit_empty_port: bool,
    pub artifacts: ArtifactSettings,
    /// Raw settings, handed to the embedded engine factory
    #[serde(skip)]
    pub settings: TestSettings,
}

impl ResolvedConfig {
    /// Local-mode configuration with defaults, independent of any settings source
    pub fn local() -> Self {
        Self::with_mode(ExecutionMode::Local, ConnectionHints::default())
    }

    /// Remote-mode configuration with the given target and hints
    pub fn remote(target: impl Into<String>, hints: ConnectionHints) -> Self {
        Self::with_mode(
            ExecutionMode::Remote {
                target: target.into(),
            },
            hints,
        )
    }

    fn with_mode(mode: ExecutionMode, hints: ConnectionHints) -> Self {
        Self {
            mode,
            hints,
            storage_handler: table::DEFAULT_STORAGE_HANDLER.to_string(),
            omit_empty_port: false,
            artifacts: ArtifactSettings::default(),
            settings: TestSettings::default(),
        }
    }
}

/// Resolve raw settings into the suite configuration.
///
/// Has no side effects; fails only when a setting cannot be read.
pub fn resolve(settings: &TestSettings) -> ConfigResult<ResolvedConfig> {
    let mode = ExecutionMode::from_selector(settings.get(keys::MODE)?.as_deref());

    let hints = ConnectionHints {
        host: settings.get(keys::ES_HOST)?,
        port: settings.get(keys::ES_PORT)?,
    };

    let storage_handler = settings
        .get(keys::STORAGE_HANDLER)?
        .unwrap_or_else(|| table::DEFAULT_STORAGE_HANDLER.to_string());

    let omit_empty_port = settings.get_bool(keys::OMIT_EMPTY_PORT)?.unwrap_or(false);

    let defaults = ArtifactSettings::default();
    let artifacts = ArtifactSettings {
        support_artifact: settings
            .get(keys::SUPPORT_ARTIFACT)?
            .map(PathBuf::from)
            .unwrap_or(defaults.support_artifact),
        data_artifact: settings
            .get(keys::DATA_ARTIFACT)?
            .map(PathBuf::from)
            .unwrap_or(defaults.data_artifact),
    };

    let resolved = ResolvedConfig {
        mode,
        hints,
        storage_handler,
        omit_empty_port,
        artifacts,
        settings: settings.clone(),
    };

    debug!(
        "Suite configuration resolved: {}",
        serde_json::to_string(&resolved).unwrap_or_else(|_| "[serialization error]".to_string())
    );

    Ok(resolved)
}
