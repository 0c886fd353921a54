//! Multi-night batch classification.
//!
//! Discovers observing-night directories under a raw data root and
//! classifies them concurrently. Each night is an independent pass, so a
//! failed night is reported without stopping the rest of the batch.

use crate::config::ClassifierConfig;
use crate::error::{Result, VeloceError};
use crate::models::{BatchStats, NightClassification};
use crate::night_log::NightLogClassifier;
use crate::observing_date::ObservingDate;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Finds observing-night directories under a raw data root
#[derive(Debug)]
pub struct NightScanner {
    raw_data_dir: PathBuf,
}

impl NightScanner {
    pub fn new(raw_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_data_dir: raw_data_dir.into(),
        }
    }

    /// Date labels of all night directories, oldest first
    ///
    /// ```text
    /// raw_data/
    ///   240219/
    ///     19feb.log
    ///     19feb30001.fits
    ///   240220/
    ///     20feb.log
    /// ```
    pub fn discover_nights(&self) -> Result<Vec<ObservingDate>> {
        if !self.raw_data_dir.is_dir() {
            return Err(VeloceError::RawDataDirNotFound {
                path: self.raw_data_dir.clone(),
            });
        }

        let mut nights = Vec::new();
        for entry in WalkDir::new(&self.raw_data_dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            match ObservingDate::parse(&name) {
                Ok(date) => nights.push(date),
                Err(_) => debug!("Skipping non-night directory {}", entry.path().display()),
            }
        }

        nights.sort_by_key(ObservingDate::date);
        debug!(
            "Found {} night directories in {}",
            nights.len(),
            self.raw_data_dir.display()
        );

        Ok(nights)
    }
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Successfully classified nights, in date order
    pub classified: Vec<NightClassification>,
    /// Nights that failed, with the reason
    pub failed: Vec<(String, VeloceError)>,
    pub stats: BatchStats,
}

/// Classifies many nights concurrently
#[derive(Debug)]
pub struct BatchClassifier {
    classifier: Arc<NightLogClassifier>,
    raw_data_dir: PathBuf,
    max_concurrent_nights: usize,
    show_progress: bool,
}

impl BatchClassifier {
    /// Create a batch classifier from configuration
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            classifier: Arc::new(NightLogClassifier::from_config(config)),
            raw_data_dir: config.raw_data_dir.clone(),
            max_concurrent_nights: config.max_concurrent_nights.max(1),
            show_progress: false,
        }
    }

    /// Show a progress bar on stderr while classifying
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Classify every night found under the raw data root
    pub async fn classify_all(&self) -> Result<BatchResult> {
        let nights = NightScanner::new(&self.raw_data_dir).discover_nights()?;
        let labels: Vec<String> = nights.iter().map(|d| d.label().to_string()).collect();
        Ok(self.classify_nights(&labels).await)
    }

    /// Classify the given nights; results keep the input order
    pub async fn classify_nights(&self, dates: &[String]) -> BatchResult {
        let start_time = Instant::now();
        let pb = self.progress_bar(dates.len());

        let outcomes: Vec<(String, Result<NightClassification>)> = stream::iter(dates)
            .map(|date| {
                let classifier = Arc::clone(&self.classifier);
                let raw_data_dir = self.raw_data_dir.clone();
                let date = date.clone();
                let pb = pb.clone();
                async move {
                    pb.set_message(format!("Classifying {}", date));
                    let task_date = date.clone();
                    let result =
                        task::spawn_blocking(move || classifier.classify_night(&task_date, &raw_data_dir))
                            .await
                            .unwrap_or_else(|e| {
                                Err(VeloceError::NightFailed {
                                    date: date.clone(),
                                    reason: e.to_string(),
                                })
                            });
                    pb.inc(1);
                    (date, result)
                }
            })
            .buffered(self.max_concurrent_nights)
            .collect()
            .await;

        pb.finish_and_clear();

        let mut result = BatchResult::default();
        for (date, outcome) in outcomes {
            match outcome {
                Ok(night) => {
                    result.stats.nights_classified += 1;
                    result.stats.calibration_runs += night.calibration_runs.run_count();
                    result.stats.science_runs += night.science_runs.run_count();
                    result.stats.anomalies += night.report.anomalies.len();
                    result.classified.push(night);
                }
                Err(e) => {
                    warn!("Night {} failed: {}", date, e);
                    result.stats.nights_failed += 1;
                    result.failed.push((date, e));
                }
            }
        }
        result.stats.processing_time_ms = start_time.elapsed().as_millis();

        result
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
