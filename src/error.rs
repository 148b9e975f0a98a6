//! Error types for the suite orchestrator.
//!
//! Failures fall into four groups: setup (fatal before any test runs),
//! provisioning (fatal, remote mode only), statements (returned to the
//! submitting test), and teardown (logged and suppressed by the resource chain).

use crate::config::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Setup failed for {resource}: {error}")]
    SetupFailure { resource: String, error: String },

    #[error("Provisioning failed during {operation} of '{path}': {error}")]
    ProvisioningFailure {
        operation: String,
        path: String,
        error: String,
    },

    #[error("Statement failed '{statement}': {error}")]
    StatementFailure { statement: String, error: String },

    #[error("Teardown failed for {resource}: {error}")]
    TeardownFailure { resource: String, error: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl SuiteError {
    /// Create a setup failure for a named resource
    pub fn setup<R: Into<String>, E: std::fmt::Display>(resource: R, error: E) -> Self {
        Self::SetupFailure {
            resource: resource.into(),
            error: format!("{error:#}"),
        }
    }

    /// Create a provisioning failure for an operation on a path
    pub fn provisioning<O: Into<String>, P: Into<String>, E: std::fmt::Display>(
        operation: O,
        path: P,
        error: E,
    ) -> Self {
        Self::ProvisioningFailure {
            operation: operation.into(),
            path: path.into(),
            error: format!("{error:#}"),
        }
    }

    /// Create a statement failure
    pub fn statement<S: Into<String>, E: std::fmt::Display>(statement: S, error: E) -> Self {
        Self::StatementFailure {
            statement: statement.into(),
            error: format!("{error:#}"),
        }
    }

    /// Create a teardown failure for a named resource
    pub fn teardown<R: Into<String>, E: std::fmt::Display>(resource: R, error: E) -> Self {
        Self::TeardownFailure {
            resource: resource.into(),
            error: format!("{error:#}"),
        }
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::StatementFailure { .. } | Self::TeardownFailure { .. }
        )
    }
}

pub type SuiteResult<T> = Result<T, SuiteError>;
