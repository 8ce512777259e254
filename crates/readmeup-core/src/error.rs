//! Core error types for readmeup-core.
//!
//! Failures follow one propagation policy: settings validation and I/O
//! problems are fatal and surface as a diagnostic plus a non-zero exit in
//! the CLI; nothing is retried. The window evaluator itself is total and
//! has no errors of its own.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for readmeup-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings-related errors
    #[error("Settings error: {0}")]
    Config(#[from] ConfigError),

    /// GitHub API fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// README/template rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load the settings file
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the settings file
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid settings value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Timezone identifier not in the tz database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Cron expression the workflow generator cannot use
    #[error("Invalid cron expression: {0}")]
    InvalidCron(String),
}

/// GitHub API fetch errors.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-success HTTP status from the API
    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Transport-level failure
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// README rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Neither a template nor an existing README to splice into
    #[error("No template at {template} and no README at {readme}")]
    NoRenderSource { template: PathBuf, readme: PathBuf },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
