//! Classification ladder and bucket accumulation
//!
//! Each reference-channel record is mapped to exactly one [`RunDestination`]
//! by a pure function, then [`RunClassifier`] appends the run id to the
//! matching bucket.

use crate::constants::buckets::{
    DARK_PREFIX, FIBRE_THORIUM_PREFIX, FLAT_PREFIX, SIM_LASER_COMB, SIM_THORIUM_PREFIX,
    STANDARD_STAR,
};
use crate::constants::objects;
use crate::models::{Anomaly, CalibrationRuns, ClassificationReport, RunRecord, ScienceRuns};
use tracing::{debug, warn};

/// Where a run belongs, decided by object name and exposure time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunDestination {
    /// Simulated laser-comb exposure
    SimLaserComb,
    /// Quartz flat field, fixed bucket per exposure time
    Flat { bucket: String },
    /// Thorium-argon arc through the science fibres, fixed bucket per exposure time
    FibreThorium { bucket: String },
    /// Simulated thorium (short or long), fixed bucket per exposure time
    SimThorium { bucket: String },
    /// Acquisition or guiding frame, not kept
    Acquisition,
    /// Dark frame, bucket created per exposure time
    Dark { bucket: String },
    /// Standard star observation
    StandardStar,
    /// Science target keyed by object name
    Science { object: String },
}

impl RunDestination {
    /// Resolve the destination of a run; first match wins
    pub fn resolve(object_name: &str, exposure_time: &str, standard_stars: &[String]) -> Self {
        match object_name {
            objects::SIM_LASER_COMB => Self::SimLaserComb,
            objects::FLAT_FIELD => Self::Flat {
                bucket: format!("{FLAT_PREFIX}{exposure_time}"),
            },
            objects::FIBRE_THORIUM_ARC => Self::FibreThorium {
                bucket: format!("{FIBRE_THORIUM_PREFIX}{exposure_time}"),
            },
            objects::SIM_THORIUM_LONG | objects::SIM_THORIUM => Self::SimThorium {
                bucket: format!("{SIM_THORIUM_PREFIX}{exposure_time}"),
            },
            objects::ACQUIRE => Self::Acquisition,
            objects::DARK_FRAME => Self::Dark {
                bucket: format!("{DARK_PREFIX}{exposure_time}"),
            },
            name if standard_stars.iter().any(|star| star == name) => Self::StandardStar,
            name => Self::Science {
                object: name.to_string(),
            },
        }
    }

    /// Calibration bucket key, `None` for science and discarded runs
    pub fn calibration_bucket(&self) -> Option<&str> {
        match self {
            Self::SimLaserComb => Some(SIM_LASER_COMB),
            Self::StandardStar => Some(STANDARD_STAR),
            Self::Flat { bucket }
            | Self::FibreThorium { bucket }
            | Self::SimThorium { bucket }
            | Self::Dark { bucket } => Some(bucket),
            Self::Acquisition | Self::Science { .. } => None,
        }
    }

    /// Bucket families with a fixed set of exposure times
    pub fn requires_existing_bucket(&self) -> bool {
        matches!(
            self,
            Self::Flat { .. } | Self::FibreThorium { .. } | Self::SimThorium { .. }
        )
    }
}

/// Accumulates classified runs for one pass over a night-log
#[derive(Debug)]
pub struct RunClassifier {
    reference_ccd: char,
    standard_stars: Vec<String>,
    calibration_runs: CalibrationRuns,
    science_runs: ScienceRuns,
}

impl RunClassifier {
    /// Create a classifier with the fixed calibration buckets, all empty
    pub fn new(reference_ccd: char, standard_stars: Vec<String>) -> Self {
        Self {
            reference_ccd,
            standard_stars,
            calibration_runs: CalibrationRuns::with_calibration_buckets(),
            science_runs: ScienceRuns::new(),
        }
    }

    /// Classify a record if it comes from the reference channel
    ///
    /// Returns the destination, or `None` when the record was not considered
    /// or its fixed bucket does not exist.
    pub fn observe(
        &mut self,
        record: &RunRecord,
        report: &mut ClassificationReport,
    ) -> Option<RunDestination> {
        if record.ccd != self.reference_ccd {
            return None;
        }
        report.reference_records += 1;

        let destination =
            RunDestination::resolve(&record.object_name, &record.exposure_time, &self.standard_stars);

        match &destination {
            RunDestination::Acquisition => {
                report.acquisitions_discarded += 1;
                debug!("Discarding acquisition frame run {}", record.run_id);
            }
            RunDestination::Science { object } => {
                self.science_runs
                    .entry_or_default(object)
                    .push(record.run_id.clone());
            }
            calibration if calibration.requires_existing_bucket() => {
                let bucket = calibration.calibration_bucket().unwrap_or_default();
                match self.calibration_runs.get_mut(bucket) {
                    Some(runs) => runs.push(record.run_id.clone()),
                    None => {
                        warn!(
                            "No calibration bucket {} for {} (run {}), run not classified",
                            bucket, record.object_name, record.run_id
                        );
                        report.anomalies.push(Anomaly::UnknownExposureTime {
                            run_id: record.run_id.clone(),
                            object_name: record.object_name.clone(),
                            bucket: bucket.to_string(),
                        });
                        return None;
                    }
                }
            }
            calibration => {
                if let Some(bucket) = calibration.calibration_bucket() {
                    self.calibration_runs
                        .entry_or_default(bucket)
                        .push(record.run_id.clone());
                }
            }
        }

        Some(destination)
    }

    /// Finish the pass and hand over the two mappings
    pub fn finish(self) -> (CalibrationRuns, ScienceRuns) {
        (self.calibration_runs, self.science_runs)
    }
}
