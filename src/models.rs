//! Core data structures for night-log classification.
//!
//! Defines the parsed run record, the ordered run buckets returned to the
//! reduction pipeline, and the anomaly report that accompanies every pass.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants::buckets::FIXED_CALIBRATION_BUCKETS;

/// One exposure line of a night-log, split into its fixed columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub run_id: String,
    pub ccd: char,
    pub object_name: String,
    pub utc: String,
    pub exposure_time: String,
    pub snr_noise: String,
    pub snr_photons: String,
    pub seeing: String,
    pub lc_status: String,
    pub thxe_status: String,
    pub read_noise: String,
    pub airmass: String,
    pub overscan: String,
    pub comments: String,
}

impl RunRecord {
    /// Whether the trailing comment field carries any text
    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }
}

/// Insertion-ordered mapping from bucket key to run ids.
///
/// Keys keep the order in which they were first created and are never
/// removed. Run ids inside a bucket keep the order in which they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunBuckets {
    order: Vec<String>,
    runs: HashMap<String, Vec<String>>,
}

/// Calibration bucket key -> run ids
pub type CalibrationRuns = RunBuckets;

/// Science object name -> run ids
pub type ScienceRuns = RunBuckets;

impl RunBuckets {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping with the fixed calibration buckets, all empty
    pub fn with_calibration_buckets() -> Self {
        let mut buckets = Self::new();
        for key in FIXED_CALIBRATION_BUCKETS {
            buckets.entry_or_default(key);
        }
        buckets
    }

    /// Get the run list for `key`, creating an empty one if absent
    pub fn entry_or_default(&mut self, key: &str) -> &mut Vec<String> {
        if !self.runs.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.runs.entry(key.to_string()).or_default()
    }

    /// Get the run list for an existing key only
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Vec<String>> {
        self.runs.get_mut(key)
    }

    /// Run ids of a bucket, if the bucket exists
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.runs.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.runs.contains_key(key)
    }

    /// Bucket keys in creation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Buckets in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order
            .iter()
            .map(|key| (key.as_str(), self.runs[key].as_slice()))
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of run ids across all buckets
    pub fn run_count(&self) -> usize {
        self.runs.values().map(Vec::len).sum()
    }

    /// Number of buckets holding at least one run
    pub fn populated_count(&self) -> usize {
        self.runs.values().filter(|runs| !runs.is_empty()).count()
    }
}

impl Serialize for RunBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (key, runs) in self.iter() {
            map.serialize_entry(key, runs)?;
        }
        map.end()
    }
}

/// Recoverable problem found while classifying a night-log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// More than one log matched; `selected` was used
    AmbiguousLog {
        selected: PathBuf,
        discarded: Vec<PathBuf>,
    },
    /// A non flat-field run carried trailing comment text
    UnexpectedComment {
        run_id: String,
        object_name: String,
        comment: String,
    },
    /// A fixed calibration family has no bucket for this exposure time
    UnknownExposureTime {
        run_id: String,
        object_name: String,
        bucket: String,
    },
    /// A run line ended before its detector channel column
    TruncatedLine { run_id: String, line_number: usize },
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::AmbiguousLog {
                selected,
                discarded,
            } => {
                let names: Vec<String> = discarded.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "More than 1 log file present, continuing with {} (ignored: {})",
                    selected.display(),
                    names.join(", ")
                )
            }
            Anomaly::UnexpectedComment {
                run_id,
                object_name,
                comment,
            } => write!(f, "Warning for {} (run {}): {}", object_name, run_id, comment),
            Anomaly::UnknownExposureTime {
                run_id,
                object_name,
                bucket,
            } => write!(
                f,
                "No calibration bucket {} for {} (run {}), run not classified",
                bucket, object_name, run_id
            ),
            Anomaly::TruncatedLine {
                run_id,
                line_number,
            } => write!(
                f,
                "Run {} on line {} is too short to carry a detector channel",
                run_id, line_number
            ),
        }
    }
}

/// Counters and anomalies collected during one classification pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    /// Log file the pass read
    pub log_path: PathBuf,
    /// Lines in the log file
    pub total_lines: usize,
    /// Lines accepted as run records
    pub run_lines: usize,
    /// Records on the reference channel
    pub reference_records: usize,
    /// Acquisition frames discarded by the classifier
    pub acquisitions_discarded: usize,
    /// Recoverable problems, in log order
    pub anomalies: Vec<Anomaly>,
}

impl ClassificationReport {
    /// Create an empty report for a log file
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            ..Self::default()
        }
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

/// Result of classifying one night
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NightClassification {
    pub date: String,
    pub calibration_runs: CalibrationRuns,
    pub science_runs: ScienceRuns,
    pub report: ClassificationReport,
}

impl NightClassification {
    /// Split into the two mappings consumed by the reduction pipeline
    pub fn into_runs(self) -> (CalibrationRuns, ScienceRuns) {
        (self.calibration_runs, self.science_runs)
    }
}

/// Batch processing statistics
#[derive(Debug, Default, Serialize)]
pub struct BatchStats {
    pub nights_classified: usize,
    pub nights_failed: usize,
    pub calibration_runs: usize,
    pub science_runs: usize,
    pub anomalies: usize,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_buckets_start_empty_in_fixed_order() {
        let buckets = RunBuckets::with_calibration_buckets();

        assert_eq!(buckets.keys().collect::<Vec<_>>(), FIXED_CALIBRATION_BUCKETS);
        assert_eq!(buckets.run_count(), 0);
        assert_eq!(buckets.populated_count(), 0);
    }

    #[test]
    fn test_entry_or_default_creates_once() {
        let mut buckets = RunBuckets::new();
        buckets.entry_or_default("NGC1234").push("0001".to_string());
        buckets.entry_or_default("HD20203").push("0002".to_string());
        buckets.entry_or_default("NGC1234").push("0003".to_string());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.keys().collect::<Vec<_>>(), vec!["NGC1234", "HD20203"]);
        assert_eq!(
            buckets.get("NGC1234"),
            Some(&["0001".to_string(), "0003".to_string()][..])
        );
        assert!(buckets.get_mut("M31").is_none());
        assert!(!buckets.contains_key("M31"));
    }

    #[test]
    fn test_serialize_preserves_key_order() {
        let mut buckets = RunBuckets::new();
        buckets.entry_or_default("zeta").push("0002".to_string());
        buckets.entry_or_default("alpha").push("0001".to_string());

        let json = serde_json::to_string(&buckets).unwrap();

        assert_eq!(json, r#"{"zeta":["0002"],"alpha":["0001"]}"#);
    }

    #[test]
    fn test_anomaly_serialization_is_tagged() {
        let anomaly = Anomaly::UnexpectedComment {
            run_id: "0042".to_string(),
            object_name: "HD20203".to_string(),
            comment: "clouds".to_string(),
        };

        let value = serde_json::to_value(&anomaly).unwrap();

        assert_eq!(value["kind"], "unexpected_comment");
        assert_eq!(value["run_id"], "0042");
    }

    #[test]
    fn test_anomaly_display_names_run_and_object() {
        let anomaly = Anomaly::UnexpectedComment {
            run_id: "0042".to_string(),
            object_name: "HD20203".to_string(),
            comment: "clouds".to_string(),
        };
        assert_eq!(anomaly.to_string(), "Warning for HD20203 (run 0042): clouds");

        let ambiguous = Anomaly::AmbiguousLog {
            selected: PathBuf::from("a.log"),
            discarded: vec![PathBuf::from("b.log"), PathBuf::from("c.log")],
        };
        let message = ambiguous.to_string();
        assert!(message.contains("a.log"));
        assert!(message.contains("b.log, c.log"));
    }

    #[test]
    fn test_into_runs() {
        let mut science_runs = ScienceRuns::new();
        science_runs.entry_or_default("NGC1234").push("0001".to_string());
        let night = NightClassification {
            date: "240219".to_string(),
            calibration_runs: CalibrationRuns::with_calibration_buckets(),
            science_runs: science_runs.clone(),
            report: ClassificationReport::new(PathBuf::from("night.log")),
        };

        let (calibration, science) = night.into_runs();

        assert_eq!(calibration.len(), FIXED_CALIBRATION_BUCKETS.len());
        assert_eq!(science, science_runs);
    }
}
