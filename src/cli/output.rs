//! Rendering of classification results
//!
//! Human-readable summaries are coloured for the terminal; JSON output is
//! stable for downstream scripts.

use crate::batch::BatchResult;
use crate::error::Result;
use crate::models::{NightClassification, RunBuckets};
use crate::observing_date::ObservingDate;
use colored::*;
use serde_json::json;
use std::fmt::Write as _;

/// Human-readable summary of one night
pub fn render_night(night: &NightClassification, show_anomalies: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "Night".bright_green().bold(),
        night.date.bright_white().bold()
    );
    let _ = writeln!(
        out,
        "  {} {}",
        "Log file:".bright_cyan(),
        night.report.log_path.display()
    );

    let _ = writeln!(out, "\n{}", "Calibration runs".bright_yellow());
    render_buckets(&mut out, &night.calibration_runs);

    let _ = writeln!(out, "\n{}", "Science runs".bright_yellow());
    if night.science_runs.is_empty() {
        let _ = writeln!(out, "  {}", "none".bright_black());
    } else {
        render_buckets(&mut out, &night.science_runs);
    }

    let anomaly_count = night.report.anomalies.len();
    if anomaly_count > 0 {
        let _ = writeln!(
            out,
            "\n  {} {}",
            "Anomalies:".bright_red(),
            anomaly_count.to_string().bright_red().bold()
        );
        if show_anomalies {
            for anomaly in &night.report.anomalies {
                let _ = writeln!(out, "    - {}", anomaly);
            }
        }
    }

    out
}

fn render_buckets(out: &mut String, buckets: &RunBuckets) {
    for (key, runs) in buckets.iter() {
        let count = format!("({})", runs.len());
        if runs.is_empty() {
            let _ = writeln!(out, "  {:<16} {}", key, count.bright_black());
        } else {
            let _ = writeln!(
                out,
                "  {:<16} {} {}",
                key.bright_cyan(),
                count.bright_white(),
                runs.join(" ")
            );
        }
    }
}

/// JSON document for one night
pub fn night_json(night: &NightClassification) -> Result<String> {
    Ok(serde_json::to_string_pretty(night)?)
}

/// Human-readable batch summary
pub fn render_batch(result: &BatchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Batch Summary".bright_green().bold());

    for night in &result.classified {
        let _ = writeln!(
            out,
            "  {} {} calibration, {} science across {} targets{}",
            night.date.bright_cyan(),
            night.calibration_runs.run_count().to_string().bright_white(),
            night.science_runs.run_count().to_string().bright_white(),
            night.science_runs.len(),
            if night.report.has_anomalies() {
                format!(", {} anomalies", night.report.anomalies.len())
                    .bright_red()
                    .to_string()
            } else {
                String::new()
            }
        );
    }
    for (date, error) in &result.failed {
        let _ = writeln!(out, "  {} {}", date.bright_red(), error);
    }

    let stats = &result.stats;
    let _ = writeln!(
        out,
        "\n  {} {}",
        "Nights classified:".bright_cyan(),
        stats.nights_classified.to_string().bright_white().bold()
    );
    if stats.nights_failed > 0 {
        let _ = writeln!(
            out,
            "  {} {}",
            "Nights failed:".bright_red(),
            stats.nights_failed.to_string().bright_red().bold()
        );
    }
    let _ = writeln!(
        out,
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );

    out
}

/// JSON document for a batch run
pub fn batch_json(result: &BatchResult) -> Result<String> {
    let failed: Vec<_> = result
        .failed
        .iter()
        .map(|(date, error)| json!({ "date": date, "error": error.to_string() }))
        .collect();

    Ok(serde_json::to_string_pretty(&json!({
        "nights": result.classified,
        "failed": failed,
        "stats": result.stats,
    }))?)
}

/// Human-readable list of nights
pub fn render_nights(nights: &[ObservingDate]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "Observing nights:".bright_green().bold(),
        nights.len().to_string().bright_white()
    );
    for night in nights {
        let _ = writeln!(out, "  {}  {}", night.label().bright_cyan(), night.date());
    }
    out
}

/// JSON list of nights
pub fn nights_json(nights: &[ObservingDate]) -> Result<String> {
    let entries: Vec<_> = nights
        .iter()
        .map(|night| {
            json!({
                "date": night.label(),
                "iso_date": night.date().to_string(),
                "month": night.month_label(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
