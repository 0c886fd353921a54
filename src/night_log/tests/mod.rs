//! Test fixtures for night-log parsing and classification
//!
//! Night-log lines are assembled column by column so the fixtures always
//! agree with the fixed-width layout.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::constants::columns::{
    AIRMASS, CCD, EXPOSURE_TIME, LC_STATUS, OBJECT_NAME, OVERSCAN_START_COLUMN, READ_NOISE, RUN_ID,
    SEEING, SNR_NOISE, SNR_PHOTONS, THXE_STATUS, UTC,
};


/// Builder for one fixed-width run line
#[derive(Debug, Clone)]
pub struct LogLine {
    run_id: String,
    ccd: char,
    object_name: String,
    exposure_time: String,
    comment: Option<String>,
}

impl LogLine {
    pub fn new(run_id: &str, ccd: char, object_name: &str, exposure_time: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            ccd,
            object_name: object_name.to_string(),
            exposure_time: exposure_time.to_string(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut columns = vec![' '; OVERSCAN_START_COLUMN];
        place(&mut columns, RUN_ID.0, &self.run_id);
        place(&mut columns, CCD.0, &self.ccd.to_string());
        place(&mut columns, OBJECT_NAME.0, &self.object_name);
        place(&mut columns, UTC.0, "13:45:10");
        place(&mut columns, EXPOSURE_TIME.0, &self.exposure_time);
        place(&mut columns, SNR_NOISE.0, "12.3");
        place(&mut columns, SNR_PHOTONS.0, "45.6");
        place(&mut columns, SEEING.0, "1.8");
        place(&mut columns, LC_STATUS.0, "ON");
        place(&mut columns, THXE_STATUS.0, "OFF");
        place(&mut columns, READ_NOISE.0, "3.21,3.19");
        place(&mut columns, AIRMASS.0, "1.02");

        let mut line: String = columns.into_iter().collect();
        line.push_str("2x2");
        if let Some(comment) = &self.comment {
            line.push(' ');
            line.push_str(comment);
        }
        line
    }
}

fn place(columns: &mut [char], start: usize, text: &str) {
    for (offset, c) in text.chars().enumerate() {
        columns[start + offset] = c;
    }
}

/// Header block written at the top of every night-log
pub fn log_header() -> Vec<String> {
    vec![
        "Veloce night log 2024-02-19".to_string(),
        String::new(),
        "Run   C Object           UTC        Exp    SNR   Phot   See  LC THXe   ReadNoise      Airm     Overscan Comments".to_string(),
        "-".repeat(110),
    ]
}

/// Exposure lines for all four detector channels of one run
pub fn exposure(run_id: &str, object_name: &str, exposure_time: &str) -> Vec<String> {
    ['1', '2', '3', '4']
        .into_iter()
        .map(|ccd| LogLine::new(run_id, ccd, object_name, exposure_time).build())
        .collect()
}

/// A realistic night with calibrations, darks, a standard star and science
pub fn sample_night_lines() -> Vec<String> {
    let mut lines = log_header();
    lines.extend(exposure("0001", "ARC-ThAr", "15.0"));
    lines.extend(exposure("0002", "ARC-ThAr", "60.0"));
    lines.extend(exposure("0003", "FlatField-Quartz", "1.0"));
    lines.extend(exposure("0004", "FlatField-Quartz", "10.0"));
    lines.extend(exposure("0005", "SimTh", "15.0"));
    lines.extend(exposure("0006", "SimThLong", "180.0"));
    lines.extend(exposure("0007", "SimLC", "60.0"));
    lines.extend(exposure("0008", "Acquire", "5.0"));
    lines.extend(exposure("0009", "HD20203", "600.0"));
    lines.extend(exposure("0010", "56139", "300.0"));
    lines.extend(exposure("0011", "DarkFrame", "1800.0"));
    lines.extend(exposure("0012", "HD20203", "600.0"));
    lines.extend(exposure("0013", "NGC1234", "1200.0"));
    lines.push(String::new());
    lines
}

/// Write a night directory with the given log files
pub fn write_night(temp_dir: &TempDir, date: &str, logs: &[(&str, &[String])]) -> PathBuf {
    let night_dir = temp_dir.path().join(date);
    fs::create_dir_all(&night_dir).unwrap();
    for (name, lines) in logs {
        fs::write(night_dir.join(name), lines.join("\n")).unwrap();
    }
    night_dir
}
