//! Classification pass over one night-log
//!
//! Orchestrates discovery, line parsing and classification. The pass is
//! synchronous and holds no state between calls, so separate nights can be
//! classified concurrently.

use std::path::Path;
use tracing::{debug, info, warn};

use super::classifier::RunClassifier;
use super::columns::ColumnLayout;
use super::discovery::{locate_night_log, read_log_lines};
use super::record_parser::{LineParse, parse_run_line};
use crate::config::ClassifierConfig;
use crate::constants::objects::FLAT_FIELD;
use crate::error::Result;
use crate::models::{
    Anomaly, CalibrationRuns, ClassificationReport, NightClassification, ScienceRuns,
};

/// Classifies Veloce night-logs into calibration and science runs
#[derive(Debug, Clone)]
pub struct NightLogClassifier {
    layout: ColumnLayout,
    log_pattern: String,
    reference_ccd: char,
    standard_stars: Vec<String>,
}

impl Default for NightLogClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

impl NightLogClassifier {
    /// Create a classifier with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from configuration
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            layout: ColumnLayout::veloce(),
            log_pattern: config.log_pattern.clone(),
            reference_ccd: config.reference_ccd,
            standard_stars: config.standard_stars.clone(),
        }
    }

    /// Locate, read and classify the night-log of `date`
    pub fn classify_night(&self, date: &str, raw_data_dir: &Path) -> Result<NightClassification> {
        info!("Identifying calibration and science runs for {}", date);

        let location = locate_night_log(raw_data_dir, date, &self.log_pattern)?;
        let lines = read_log_lines(&location.selected)?;

        let mut report = ClassificationReport::new(location.selected.clone());
        if location.is_ambiguous() {
            report.anomalies.push(Anomaly::AmbiguousLog {
                selected: location.selected.clone(),
                discarded: location.discarded.clone(),
            });
        }

        let (calibration_runs, science_runs) =
            self.classify_lines(lines.iter().map(String::as_str), &mut report);

        info!(
            "Classified {} reference runs from {} ({} science targets)",
            report.reference_records,
            location.selected.display(),
            science_runs.len()
        );

        Ok(NightClassification {
            date: date.to_string(),
            calibration_runs,
            science_runs,
            report,
        })
    }

    /// Classify already-read log lines
    pub fn classify_lines<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
        report: &mut ClassificationReport,
    ) -> (CalibrationRuns, ScienceRuns) {
        let mut classifier = RunClassifier::new(self.reference_ccd, self.standard_stars.clone());

        for (index, line) in lines.into_iter().enumerate() {
            report.total_lines += 1;

            let record = match parse_run_line(line, &self.layout) {
                LineParse::NotARun => continue,
                LineParse::Truncated { run_id } => {
                    warn!("Run {} on line {} has no detector channel", run_id, index + 1);
                    report.anomalies.push(Anomaly::TruncatedLine {
                        run_id,
                        line_number: index + 1,
                    });
                    continue;
                }
                LineParse::Run(record) => record,
            };
            report.run_lines += 1;

            if record.has_comments() && record.object_name != FLAT_FIELD {
                warn!(
                    "Warning for {} (run {}): {}",
                    record.object_name, record.run_id, record.comments
                );
                report.anomalies.push(Anomaly::UnexpectedComment {
                    run_id: record.run_id.clone(),
                    object_name: record.object_name.clone(),
                    comment: record.comments.clone(),
                });
            }

            if let Some(destination) = classifier.observe(&record, report) {
                debug!("Run {} -> {:?}", record.run_id, destination);
            }
        }

        classifier.finish()
    }
}

/// Classify the night-log of `date` with the default configuration
///
/// Returns the calibration runs keyed by bucket and the science runs keyed
/// by object name. Fails only when no night-log can be found or read.
pub fn identify_calibration_and_science_runs(
    date: &str,
    raw_data_dir: &Path,
) -> Result<(CalibrationRuns, ScienceRuns)> {
    NightLogClassifier::new()
        .classify_night(date, raw_data_dir)
        .map(NightClassification::into_runs)
}
