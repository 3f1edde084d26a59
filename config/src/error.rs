//! Error types for option definition files.
//!
//! Covers reading the file, decoding it as YAML or JSON, and building a
//! registry from the decoded definition.

use thiserror::Error;

/// Errors that can occur while loading or applying an [`OptionsConfig`](crate::OptionsConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// An option entry cannot be turned into an option spec.
    #[error("invalid option definition: {0}")]
    InvalidOption(String),

    /// The file extension does not name a supported format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
