//! Error handling for night-log classification.
//!
//! Only failures that stop a classification pass live here. Per-line
//! problems are recovered locally and surface as [`crate::models::Anomaly`]
//! values instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VeloceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No night-log matching '{pattern}' found in {dir}")]
    MissingLog { dir: PathBuf, pattern: String },

    #[error("Failed to read night-log {path}: {source}")]
    UnreadableLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log file pattern '{pattern}': {source}")]
    InvalidLogPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Glob traversal failed: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Raw data directory not found at path: {path}")]
    RawDataDirNotFound { path: PathBuf },

    #[error("Directory traversal failed: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("Invalid observing date '{label}': {reason}")]
    InvalidDate { label: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid spectrum input: {reason}")]
    InvalidSpectrum { reason: String },

    #[error("Classification of night {date} failed: {reason}")]
    NightFailed { date: String, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VeloceError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid spectrum error
    pub fn invalid_spectrum(reason: impl Into<String>) -> Self {
        Self::InvalidSpectrum {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VeloceError>;
