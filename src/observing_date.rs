//! Observing-date labels.
//!
//! Raw data directories are named after the local date of the night in
//! `YYMMDD` form, e.g. `240219` for 19 February 2024.

use crate::constants::DATE_LABEL_PATTERN;
use crate::error::{Result, VeloceError};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static DATE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_LABEL_PATTERN).expect("date label pattern is valid"));

const MONTH_LABELS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// A validated `YYMMDD` observing-date label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObservingDate {
    label: String,
    date: NaiveDate,
}

impl ObservingDate {
    /// Parse and validate a date label
    pub fn parse(label: &str) -> Result<Self> {
        if !DATE_LABEL.is_match(label) {
            return Err(VeloceError::invalid_date(label, "expected six digits (YYMMDD)"));
        }

        let date = NaiveDate::parse_from_str(label, "%y%m%d")
            .map_err(|e| VeloceError::invalid_date(label, e.to_string()))?;

        Ok(Self {
            label: label.to_string(),
            date,
        })
    }

    /// Whether a string is a well-formed date label
    pub fn is_label(label: &str) -> bool {
        Self::parse(label).is_ok()
    }

    /// The label as written in the directory name
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Lowercase three-letter month, as used in Veloce raw file names
    pub fn month_label(&self) -> &'static str {
        MONTH_LABELS[self.date.month0() as usize]
    }
}

impl fmt::Display for ObservingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Month label (`jan`..`dec`) of a `YYMMDD` date label
///
/// Only the month digits are checked, so a label such as `240231` still
/// maps to `feb`.
pub fn match_month_to_date(label: &str) -> Result<&'static str> {
    if !DATE_LABEL.is_match(label) {
        return Err(VeloceError::invalid_date(label, "expected six digits (YYMMDD)"));
    }

    let month: usize = label[2..4]
        .parse()
        .map_err(|_| VeloceError::invalid_date(label, "month is not numeric"))?;

    MONTH_LABELS
        .get(month.wrapping_sub(1))
        .copied()
        .ok_or_else(|| VeloceError::invalid_date(label, format!("month {:02} out of range", month)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_label() {
        let date = ObservingDate::parse("240219").unwrap();

        assert_eq!(date.label(), "240219");
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 2, 19).unwrap());
        assert_eq!(date.to_string(), "240219");
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(match_month_to_date("240119").unwrap(), "jan");
        assert_eq!(match_month_to_date("240219").unwrap(), "feb");
        assert_eq!(match_month_to_date("231231").unwrap(), "dec");
    }

    #[test]
    fn test_month_label_ignores_day_digits() {
        assert_eq!(match_month_to_date("240231").unwrap(), "feb");
        assert_eq!(match_month_to_date("230229").unwrap(), "feb");
        assert!(ObservingDate::parse("240231").is_err());
    }

    #[test]
    fn test_month_label_rejects_bad_months() {
        for label in ["240019", "241319", "2402", "24-219", "abcdef", "२४०२१९"] {
            assert!(
                matches!(
                    match_month_to_date(label),
                    Err(VeloceError::InvalidDate { .. })
                ),
                "label {:?} should be rejected",
                label
            );
        }
    }

    #[test]
    fn test_rejects_malformed_labels() {
        for label in ["", "24021", "2402190", "24-02-19", "abcdef", " 240219"] {
            assert!(
                matches!(
                    ObservingDate::parse(label),
                    Err(VeloceError::InvalidDate { .. })
                ),
                "label {:?} should be rejected",
                label
            );
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(ObservingDate::parse("241301").is_err());
        assert!(ObservingDate::parse("230229").is_err());
        assert!(ObservingDate::parse("240229").is_ok());
    }

    #[test]
    fn test_dates_order_chronologically() {
        let earlier = ObservingDate::parse("231231").unwrap();
        let later = ObservingDate::parse("240101").unwrap();

        assert!(earlier.date() < later.date());
        assert!(ObservingDate::is_label("240101"));
        assert!(!ObservingDate::is_label("night1"));
    }
}
