//! Fixed-width column table of a night-log run line
//!
//! The observing software writes every field at a fixed character offset.
//! The offsets are a format contract: they are kept in one table and applied
//! uniformly so that sample logs can be checked against it.

use crate::constants::columns::{
    AIRMASS, CCD, COMMENT_BASE_COLUMN, EXPOSURE_TIME, LC_STATUS, OBJECT_NAME, OVERSCAN_START_COLUMN,
    READ_NOISE, RUN_ID, SEEING, SNR_NOISE, SNR_PHOTONS, THXE_STATUS, UTC,
};

/// Fields located by a fixed column range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogField {
    RunId,
    Ccd,
    ObjectName,
    Utc,
    ExposureTime,
    SnrNoise,
    SnrPhotons,
    Seeing,
    LcStatus,
    ThxeStatus,
    ReadNoise,
    Airmass,
}

/// Character range `[start, end)` of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub field: LogField,
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    const fn new(field: LogField, (start, end): (usize, usize)) -> Self {
        Self { field, start, end }
    }
}

/// Column layout of the Veloce night-log
pub const VELOCE_COLUMNS: &[ColumnSpan] = &[
    ColumnSpan::new(LogField::RunId, RUN_ID),
    ColumnSpan::new(LogField::Ccd, CCD),
    ColumnSpan::new(LogField::ObjectName, OBJECT_NAME),
    ColumnSpan::new(LogField::Utc, UTC),
    ColumnSpan::new(LogField::ExposureTime, EXPOSURE_TIME),
    ColumnSpan::new(LogField::SnrNoise, SNR_NOISE),
    ColumnSpan::new(LogField::SnrPhotons, SNR_PHOTONS),
    ColumnSpan::new(LogField::Seeing, SEEING),
    ColumnSpan::new(LogField::LcStatus, LC_STATUS),
    ColumnSpan::new(LogField::ThxeStatus, THXE_STATUS),
    ColumnSpan::new(LogField::ReadNoise, READ_NOISE),
    ColumnSpan::new(LogField::Airmass, AIRMASS),
];

/// Column table plus the rules for the trailing overscan and comment fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    spans: Vec<ColumnSpan>,
    overscan_start: usize,
    comment_base: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::veloce()
    }
}

impl ColumnLayout {
    /// The layout written by the Veloce observing software
    pub fn veloce() -> Self {
        Self {
            spans: VELOCE_COLUMNS.to_vec(),
            overscan_start: OVERSCAN_START_COLUMN,
            comment_base: COMMENT_BASE_COLUMN,
        }
    }

    pub fn spans(&self) -> &[ColumnSpan] {
        &self.spans
    }

    /// Column range of a field
    pub fn span(&self, field: LogField) -> Option<ColumnSpan> {
        self.spans.iter().copied().find(|span| span.field == field)
    }

    /// Raw (untrimmed) text of a field; empty when the line is too short
    pub fn raw<'a>(&self, line: &'a str, field: LogField) -> &'a str {
        self.span(field)
            .map_or("", |span| column_slice(line, span.start, span.end))
    }

    /// Trimmed text of a field
    pub fn field<'a>(&self, line: &'a str, field: LogField) -> &'a str {
        self.raw(line, field).trim()
    }

    /// First whitespace-delimited token at or after the overscan column
    pub fn overscan<'a>(&self, line: &'a str) -> &'a str {
        column_slice(line, self.overscan_start, usize::MAX)
            .split_whitespace()
            .next()
            .unwrap_or("")
    }

    /// Remainder of the line after the overscan token, untrimmed
    pub fn comments<'a>(&self, line: &'a str, overscan: &str) -> &'a str {
        let start = self.comment_base + overscan.chars().count();
        column_slice(line, start, usize::MAX)
    }
}

/// Slice `line` by character columns `[start, end)`, clamped to the line
pub fn column_slice(line: &str, start: usize, end: usize) -> &str {
    let begin = byte_offset(line, start);
    let finish = byte_offset(line, end.max(start));
    &line[begin..finish]
}

fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_slice_within_line() {
        assert_eq!(column_slice("0123456789", 2, 5), "234");
        assert_eq!(column_slice("0123456789", 0, 4), "0123");
    }

    #[test]
    fn test_column_slice_clamps_to_line() {
        assert_eq!(column_slice("0123", 2, 10), "23");
        assert_eq!(column_slice("0123", 6, 10), "");
        assert_eq!(column_slice("", 0, 4), "");
    }

    #[test]
    fn test_column_slice_counts_characters() {
        // 'é' is two bytes but one column
        assert_eq!(column_slice("aéb-cd", 2, 4), "b-");
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let layout = ColumnLayout::veloce();
        for pair in layout.spans().windows(2) {
            assert!(pair[0].start < pair[0].end);
            assert!(pair[0].end <= pair[1].start);
        }
        let last = layout.spans().last().unwrap();
        assert!(last.end <= OVERSCAN_START_COLUMN);
    }

    #[test]
    fn test_every_field_has_a_span() {
        let layout = ColumnLayout::veloce();
        for field in [
            LogField::RunId,
            LogField::Ccd,
            LogField::ObjectName,
            LogField::Utc,
            LogField::ExposureTime,
            LogField::SnrNoise,
            LogField::SnrPhotons,
            LogField::Seeing,
            LogField::LcStatus,
            LogField::ThxeStatus,
            LogField::ReadNoise,
            LogField::Airmass,
        ] {
            assert!(layout.span(field).is_some(), "missing span for {:?}", field);
        }
    }

    #[test]
    fn test_overscan_and_comments() {
        let layout = ColumnLayout::veloce();
        let mut line = " ".repeat(97);
        line.push_str("2x2 lamp flicker ");

        let overscan = layout.overscan(&line);
        assert_eq!(overscan, "2x2");
        assert_eq!(layout.comments(&line, overscan), "lamp flicker ");
    }

    #[test]
    fn test_missing_overscan_is_empty() {
        let layout = ColumnLayout::veloce();
        let line = "0001  3 SimLC";

        assert_eq!(layout.overscan(line), "");
        assert_eq!(layout.comments(line, ""), "");
    }
}
