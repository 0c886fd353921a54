//! Night-log discovery for a single observing date
//!
//! The raw data of a night lives in `<raw_data_dir>/<date>/`, and exactly
//! one `*.log` file in that directory is expected to describe it.

use crate::error::{Result, VeloceError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The log file chosen for a night, plus any matches that were ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLocation {
    pub selected: PathBuf,
    pub discarded: Vec<PathBuf>,
}

impl LogLocation {
    /// More than one file matched the log pattern
    pub fn is_ambiguous(&self) -> bool {
        !self.discarded.is_empty()
    }
}

/// Locate the night-log of `date` under `raw_data_dir`
///
/// Matches are ordered lexicographically and the first one is selected.
/// Zero matches is fatal for the night.
pub fn locate_night_log(raw_data_dir: &Path, date: &str, pattern: &str) -> Result<LogLocation> {
    let night_dir = raw_data_dir.join(date);
    let search = format!(
        "{}/{}",
        glob::Pattern::escape(&night_dir.to_string_lossy()),
        pattern
    );

    let mut matches = glob::glob(&search)
        .map_err(|source| VeloceError::InvalidLogPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(Ok(path)),
            Ok(_) => None,
            Err(e) => Some(Err(VeloceError::from(e))),
        })
        .collect::<Result<Vec<PathBuf>>>()?;

    matches.sort();

    let mut matches = matches.into_iter();
    let selected = matches.next().ok_or_else(|| VeloceError::MissingLog {
        dir: night_dir.clone(),
        pattern: pattern.to_string(),
    })?;
    let discarded: Vec<PathBuf> = matches.collect();

    if discarded.is_empty() {
        info!("Found log file {}", selected.display());
    } else {
        let names: Vec<String> = discarded.iter().map(|p| p.display().to_string()).collect();
        warn!(
            "More than 1 log file present, continuing with {} (ignoring {})",
            selected.display(),
            names.join(", ")
        );
    }

    Ok(LogLocation {
        selected,
        discarded,
    })
}

/// Read a night-log fully into memory, one entry per line
pub fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| VeloceError::UnreadableLog {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.lines().map(str::to_string).collect())
}
