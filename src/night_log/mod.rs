//! Night-log parser and run classifier
//!
//! Turns the plain-text night-log of a Veloce observing night into the two
//! run mappings the reduction pipeline starts from: calibration runs keyed
//! by bucket and science runs keyed by object name.
//!
//! ## Architecture
//!
//! - [`discovery`] - locating and reading the night-log of a date
//! - [`columns`] - the fixed-width column table of a run line
//! - [`record_parser`] - run-line gate and field extraction
//! - [`classifier`] - first-match classification ladder and bucket accumulation
//! - [`parser`] - orchestration of a full classification pass
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use veloce_runs::night_log::identify_calibration_and_science_runs;
//!
//! # fn example() -> veloce_runs::Result<()> {
//! let (calibration_runs, science_runs) =
//!     identify_calibration_and_science_runs("240219", Path::new("raw_data"))?;
//!
//! println!("{} flat runs at 1s", calibration_runs.get("Flat_1.0").map_or(0, |r| r.len()));
//! println!("{} science targets", science_runs.len());
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod columns;
pub mod discovery;
pub mod parser;
pub mod record_parser;

#[cfg(test)]
pub mod tests;

pub use classifier::{RunClassifier, RunDestination};
pub use columns::{ColumnLayout, ColumnSpan, LogField};
pub use discovery::{LogLocation, locate_night_log, read_log_lines};
pub use parser::{NightLogClassifier, identify_calibration_and_science_runs};
pub use record_parser::{LineParse, is_run_line, parse_run_line};
