//! Run-line gate and field extraction
//!
//! A run line starts with a four-digit run identifier. Anything else in the
//! log (headers, separators, blank lines) is not a run and is skipped.

use super::columns::{ColumnLayout, LogField, column_slice};
use crate::constants::columns::{CCD, RUN_ID, RUN_ID_WIDTH};
use crate::models::RunRecord;

/// Outcome of parsing one log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParse {
    /// Header, separator or blank line
    NotARun,
    /// Starts with a run id but ends before the detector channel column
    Truncated { run_id: String },
    Run(RunRecord),
}

/// Whether a line starts with a numeric run identifier
pub fn is_run_line(line: &str) -> bool {
    let run_id = column_slice(line, RUN_ID.0, RUN_ID.1);
    run_id.chars().count() == RUN_ID_WIDTH && run_id.chars().all(|c| c.is_ascii_digit())
}

/// Parse one log line into a run record
pub fn parse_run_line(line: &str, layout: &ColumnLayout) -> LineParse {
    if !is_run_line(line) {
        return LineParse::NotARun;
    }

    let run_id = layout.raw(line, LogField::RunId).to_string();

    let Some(ccd) = column_slice(line, CCD.0, CCD.1).chars().next() else {
        return LineParse::Truncated { run_id };
    };

    let overscan = layout.overscan(line);
    let comments = layout.comments(line, overscan);

    LineParse::Run(RunRecord {
        run_id,
        ccd,
        object_name: layout.field(line, LogField::ObjectName).to_string(),
        utc: layout.field(line, LogField::Utc).to_string(),
        exposure_time: layout.field(line, LogField::ExposureTime).to_string(),
        snr_noise: layout.field(line, LogField::SnrNoise).to_string(),
        snr_photons: layout.field(line, LogField::SnrPhotons).to_string(),
        seeing: layout.field(line, LogField::Seeing).to_string(),
        lc_status: layout.field(line, LogField::LcStatus).to_string(),
        thxe_status: layout.field(line, LogField::ThxeStatus).to_string(),
        read_noise: layout.field(line, LogField::ReadNoise).to_string(),
        airmass: layout.field(line, LogField::Airmass).to_string(),
        overscan: overscan.to_string(),
        comments: comments.to_string(),
    })
}
