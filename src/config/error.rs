//! Configuration Error Types
//!
//! Errors raised while reading suite settings or resolving them into a
//! [`super::ResolvedConfig`]. All of them abort the suite before any resource
//! is acquired.

use thiserror::Error;

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// File I/O errors during settings loading
    #[error("Failed to read settings file '{file_path}': {error}")]
    FileReadError { file_path: String, error: String },

    /// Settings sources could not be merged or parsed
    #[error("Test settings could not be read: {error}")]
    SettingsUnreadable { error: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },
}

impl ConfigurationError {
    /// Create a file read error
    pub fn file_read_error<P: Into<String>, E: std::fmt::Display>(file_path: P, error: E) -> Self {
        Self::FileReadError {
            file_path: file_path.into(),
            error: error.to_string(),
        }
    }

    /// Create a settings unreadable error
    pub fn settings_unreadable<E: std::fmt::Display>(error: E) -> Self {
        Self::SettingsUnreadable {
            error: error.to_string(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value<F: Into<String>, V: Into<String>, C: Into<String>>(
        field: F,
        value: V,
        context: C,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;
