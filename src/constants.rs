//! Application constants for the Veloce run classifier
//!
//! This module contains the night-log column layout, the object names that
//! drive classification, bucket naming and default configuration values.

// =============================================================================
// Night-Log Discovery
// =============================================================================

/// Default glob pattern for night-log files inside a night directory
pub const DEFAULT_LOG_PATTERN: &str = "*.log";

/// Default raw data root, relative to the working directory
pub const DEFAULT_RAW_DATA_DIR: &str = "raw_data";

/// Application directory name used for the user configuration file
pub const CONFIG_DIR_NAME: &str = "veloce-runs";

/// Configuration file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Night-Log Column Layout
// =============================================================================

/// Fixed-width column boundaries of a night-log run line.
///
/// Offsets are character positions, start inclusive and end exclusive. The
/// overscan and comment fields are located relative to
/// [`OVERSCAN_START_COLUMN`] rather than by a fixed range.
pub mod columns {
    /// Width of the run identifier at the start of each run line
    pub const RUN_ID_WIDTH: usize = 4;

    pub const RUN_ID: (usize, usize) = (0, 4);
    pub const CCD: (usize, usize) = (6, 7);
    pub const OBJECT_NAME: (usize, usize) = (8, 25);
    pub const UTC: (usize, usize) = (25, 33);
    pub const EXPOSURE_TIME: (usize, usize) = (35, 42);
    pub const SNR_NOISE: (usize, usize) = (42, 48);
    pub const SNR_PHOTONS: (usize, usize) = (48, 53);
    pub const SEEING: (usize, usize) = (55, 59);
    pub const LC_STATUS: (usize, usize) = (60, 62);
    pub const THXE_STATUS: (usize, usize) = (63, 67);
    pub const READ_NOISE: (usize, usize) = (70, 85);
    pub const AIRMASS: (usize, usize) = (87, 91);

    /// Column where the search for the overscan token begins
    pub const OVERSCAN_START_COLUMN: usize = 97;

    /// Comments begin at this column plus the overscan token length
    pub const COMMENT_BASE_COLUMN: usize = 98;
}

// =============================================================================
// Classification
// =============================================================================

/// Detector channel whose records decide classification (always read out)
pub const DEFAULT_REFERENCE_CCD: char = '3';

/// Object names written to the night-log by the observing software
pub mod objects {
    pub const SIM_LASER_COMB: &str = "SimLC";
    pub const FLAT_FIELD: &str = "FlatField-Quartz";
    pub const FIBRE_THORIUM_ARC: &str = "ARC-ThAr";
    pub const SIM_THORIUM: &str = "SimTh";
    pub const SIM_THORIUM_LONG: &str = "SimThLong";
    pub const ACQUIRE: &str = "Acquire";
    pub const DARK_FRAME: &str = "DarkFrame";
}

/// Catalogue identifiers of the standard (B) stars observed for telluric correction
pub const DEFAULT_STANDARD_STARS: &[&str] = &["56139", "105435", "127972"];

/// Calibration bucket names and prefixes
pub mod buckets {
    pub const FIBRE_THORIUM_PREFIX: &str = "FibTh_";
    pub const SIM_THORIUM_PREFIX: &str = "SimTh_";
    pub const FLAT_PREFIX: &str = "Flat_";
    pub const DARK_PREFIX: &str = "Dark_";
    pub const SIM_LASER_COMB: &str = "SimLC";
    pub const STANDARD_STAR: &str = "Bstar";

    /// Calibration buckets present in every result, in output order
    pub const FIXED_CALIBRATION_BUCKETS: &[&str] = &[
        "FibTh_15.0",
        "FibTh_60.0",
        "FibTh_180.0",
        "SimTh_15.0",
        "SimTh_60.0",
        "SimTh_180.0",
        "SimLC",
        "Flat_0.1",
        "Flat_1.0",
        "Flat_10.0",
        "Flat_60.0",
        "Bstar",
    ];
}

// =============================================================================
// Batch Processing
// =============================================================================

/// Observing date labels are YYMMDD
pub const DATE_LABEL_PATTERN: &str = r"^[0-9]{6}$";

/// Default number of nights classified concurrently
pub const DEFAULT_MAX_CONCURRENT_NIGHTS: usize = 4;

// =============================================================================
// Physical Constants
// =============================================================================

/// Speed of light in km/s
pub const SPEED_OF_LIGHT_KMS: f64 = 299_792.458;

/// Flux assigned to interpolation targets outside the sampled wavelength range
pub const CONTINUUM_FILL_VALUE: f64 = 1.0;
