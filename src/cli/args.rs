//! Command-line argument definitions for the Veloce run classifier
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Veloce night-log run classifier
///
/// Reads the night-log of an observing date and sorts every exposure into
/// calibration buckets (arcs, simulated thorium, flats, darks, standard
/// stars) or science targets.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "veloce-runs",
    version,
    about = "Classify Veloce night-log exposures into calibration and science runs"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Classify the runs of a single observing night
    Classify(ClassifyArgs),
    /// Classify every night found under the raw data directory
    Batch(BatchArgs),
    /// List the observing nights found under the raw data directory
    Nights(NightsArgs),
}

/// Options shared by all subcommands
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Raw data directory containing one sub-directory per observing date
    ///
    /// Overrides `raw_data_dir` from the configuration file.
    #[arg(
        short = 'r',
        long = "raw-data-dir",
        value_name = "PATH",
        help = "Raw data directory (one sub-directory per date)"
    )]
    pub raw_data_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/veloce-runs/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Glob pattern of the night-log inside a night directory
    #[arg(long = "log-pattern", value_name = "GLOB")]
    pub log_pattern: Option<String>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Write results to a file instead of stdout
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Log level from verbosity flags; warnings stay visible by default
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Arguments for the classify command
#[derive(Debug, Clone, Parser)]
pub struct ClassifyArgs {
    /// Observing date label (YYMMDD), also the night directory name
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Also list the anomalies found while parsing the log
    #[arg(long = "show-anomalies")]
    pub show_anomalies: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Nights to classify; all nights under the raw data directory if omitted
    #[arg(value_name = "DATE")]
    pub dates: Vec<String>,

    /// Number of nights classified concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the nights command
#[derive(Debug, Clone, Parser)]
pub struct NightsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}
