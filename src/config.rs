//! Configuration management and validation.
//!
//! Provides the classifier configuration, loaded in layers: built-in
//! defaults, then an optional TOML file, then command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_PATTERN, DEFAULT_MAX_CONCURRENT_NIGHTS,
    DEFAULT_RAW_DATA_DIR, DEFAULT_REFERENCE_CCD, DEFAULT_STANDARD_STARS,
};
use crate::error::{Result, VeloceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for night-log classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Root directory holding one sub-directory per observing date
    pub raw_data_dir: PathBuf,

    /// Glob pattern of the night-log inside a night directory
    pub log_pattern: String,

    /// Detector channel whose records are classified
    pub reference_ccd: char,

    /// Catalogue identifiers classified as standard stars
    pub standard_stars: Vec<String>,

    /// Maximum nights classified concurrently in batch mode
    pub max_concurrent_nights: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            raw_data_dir: PathBuf::from(DEFAULT_RAW_DATA_DIR),
            log_pattern: DEFAULT_LOG_PATTERN.to_string(),
            reference_ccd: DEFAULT_REFERENCE_CCD,
            standard_stars: DEFAULT_STANDARD_STARS
                .iter()
                .map(|star| star.to_string())
                .collect(),
            max_concurrent_nights: num_cpus::get().clamp(1, DEFAULT_MAX_CONCURRENT_NIGHTS),
        }
    }
}

impl ClassifierConfig {
    /// Default config file location (`<config_dir>/veloce-runs/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|source| VeloceError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from an explicit file, else the default location, else defaults
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            return Self::from_file(path);
        }

        match Self::default_config_path().filter(|path| path.exists()) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Set the raw data root
    pub fn with_raw_data_dir(mut self, raw_data_dir: impl Into<PathBuf>) -> Self {
        self.raw_data_dir = raw_data_dir.into();
        self
    }

    /// Set the night-log glob pattern
    pub fn with_log_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.log_pattern = pattern.into();
        self
    }

    /// Set the reference detector channel
    pub fn with_reference_ccd(mut self, ccd: char) -> Self {
        self.reference_ccd = ccd;
        self
    }

    /// Replace the standard-star identifiers
    pub fn with_standard_stars(mut self, stars: Vec<String>) -> Self {
        self.standard_stars = stars;
        self
    }

    /// Set maximum concurrent nights
    pub fn with_max_concurrent_nights(mut self, max_nights: usize) -> Self {
        self.max_concurrent_nights = max_nights;
        self
    }

    /// Check configuration values before use
    pub fn validate(&self) -> Result<()> {
        if self.log_pattern.trim().is_empty() {
            return Err(VeloceError::configuration("log_pattern must not be empty"));
        }
        if self.log_pattern.contains('/') {
            return Err(VeloceError::configuration(format!(
                "log_pattern '{}' must match a file name, not a path",
                self.log_pattern
            )));
        }
        glob::Pattern::new(&self.log_pattern).map_err(|e| {
            VeloceError::configuration(format!("invalid log_pattern '{}': {}", self.log_pattern, e))
        })?;
        if !self.reference_ccd.is_ascii_digit() {
            return Err(VeloceError::configuration(format!(
                "reference_ccd must be a digit, got '{}'",
                self.reference_ccd
            )));
        }
        if self.standard_stars.iter().any(|star| star.trim().is_empty()) {
            return Err(VeloceError::configuration(
                "standard_stars must not contain empty identifiers",
            ));
        }
        if self.max_concurrent_nights == 0 {
            return Err(VeloceError::configuration(
                "max_concurrent_nights must be at least 1",
            ));
        }
        Ok(())
    }
}
