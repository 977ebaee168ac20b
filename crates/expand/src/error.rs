//! Errors raised while loading project configuration files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors emitted while loading a project configuration.
///
/// Options resolution itself never fails; only reading configuration
/// files from disk or parsing them can.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// JSON failed to parse.
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML failed to parse.
    #[error("Config YAML error: {0}")]
    Yaml(String),
    /// Top-level value was not a mapping.
    #[error("Config must be a mapping at the top level")]
    InvalidRootType,
}
