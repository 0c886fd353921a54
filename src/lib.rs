//! Veloce Run Classifier Library
//!
//! A Rust library for sorting the exposures of a Veloce spectrograph
//! observing night into calibration and science runs, the first step of the
//! reduction pipeline.
//!
//! This library provides tools for:
//! - Locating the night-log of an observing date
//! - Parsing the fixed-column night-log format into run records
//! - Classifying runs into arc, simulated thorium, laser comb, flat, dark and
//!   standard-star buckets, or into science targets by object name
//! - Reporting recoverable anomalies without aborting the pass
//! - Classifying many nights concurrently
//! - Small wavelength-domain helpers (Doppler shift, polynomials, resampling)

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod night_log;
pub mod observing_date;
pub mod spectrum;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod output;
}

// Re-export commonly used types
pub use config::ClassifierConfig;
pub use error::{Result, VeloceError};
pub use models::{
    Anomaly, CalibrationRuns, ClassificationReport, NightClassification, RunBuckets, RunRecord,
    ScienceRuns,
};
pub use night_log::{NightLogClassifier, identify_calibration_and_science_runs};
pub use observing_date::{ObservingDate, match_month_to_date};
