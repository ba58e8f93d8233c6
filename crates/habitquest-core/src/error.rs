//! Core error types for habitquest-core.
//!
//! This module defines the error hierarchy using thiserror. One taxonomy
//! note: "already completed today" is a guard outcome, not an error -- it
//! is reported as a structured [`Completion::Rejected`] result by the
//! progression engine and never appears here.
//!
//! [`Completion::Rejected`]: crate::progression::Completion

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors (either backend)
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by the storage backends.
///
/// Both the local mirror and the remote store report through this one
/// enum so the engine handles failures identically regardless of which
/// backend is active.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No profile exists for the given identity.
    #[error("No profile found for this identity")]
    NotFound,

    /// A mutation was attempted with no identity and outside guest mode.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The mirror record exists on disk but is not well-formed JSON.
    /// Callers treat this as NotFound plus a data-lost flag.
    #[error("Corrupt mirror record at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The remote store answered with a non-success status.
    #[error("Remote store error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Network-level failure before a response arrived.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store base URL could not be parsed.
    #[error("Invalid remote base URL: {0}")]
    BadUrl(#[from] url::ParseError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors from the mirror file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether this failure means "nothing stored yet" rather than a
    /// broken backend. Parse counts: a corrupt mirror record is treated
    /// as missing data, with the loss flagged separately.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, StoreError::NotFound | StoreError::Parse { .. })
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory could not be resolved or created
    #[error("Failed to prepare config directory: {0}")]
    DirUnavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
