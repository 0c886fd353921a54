//! Command implementations for the Veloce run classifier CLI

use crate::batch::{BatchClassifier, NightScanner};
use crate::cli::args::{Args, BatchArgs, ClassifyArgs, Commands, CommonArgs, NightsArgs, OutputFormat};
use crate::cli::output;
use crate::config::ClassifierConfig;
use crate::night_log::NightLogClassifier;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Run the command selected on the command line
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Classify(classify_args)) => run_classify(classify_args).await,
        Some(Commands::Batch(batch_args)) => run_batch(batch_args).await,
        Some(Commands::Nights(nights_args)) => run_nights(nights_args),
        None => Ok(()),
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(common: &CommonArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("veloce_runs={}", log_level)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration using the layered approach (file -> args)
pub fn load_configuration(common: &CommonArgs) -> Result<ClassifierConfig> {
    let mut config = ClassifierConfig::load_layered(common.config_file.as_deref())
        .context("Failed to load configuration")?;

    apply_cli_overrides(&mut config, common);
    config.validate().context("Invalid configuration")?;

    info!("Raw data directory: {}", config.raw_data_dir.display());
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut ClassifierConfig, common: &CommonArgs) {
    if let Some(raw_data_dir) = &common.raw_data_dir {
        config.raw_data_dir = raw_data_dir.clone();
    }
    if let Some(pattern) = &common.log_pattern {
        config.log_pattern = pattern.clone();
    }
}

async fn run_classify(args: ClassifyArgs) -> Result<()> {
    setup_logging(&args.common);
    let config = load_configuration(&args.common)?;

    let classifier = NightLogClassifier::from_config(&config);
    let date = args.date.clone();
    let raw_data_dir = config.raw_data_dir.clone();

    let night = tokio::task::spawn_blocking(move || classifier.classify_night(&date, &raw_data_dir))
        .await
        .context("Classification task failed")?
        .with_context(|| format!("Failed to classify night {}", args.date))?;

    let rendered = match args.common.output_format {
        OutputFormat::Human => output::render_night(&night, args.show_anomalies),
        OutputFormat::Json => output::night_json(&night)?,
    };
    emit(&rendered, args.common.output_file.as_deref())
}

async fn run_batch(args: BatchArgs) -> Result<()> {
    setup_logging(&args.common);
    let mut config = load_configuration(&args.common)?;
    if let Some(workers) = args.workers {
        config = config.with_max_concurrent_nights(workers);
        config.validate().context("Invalid worker count")?;
    }

    let batch = BatchClassifier::new(&config).with_progress(!args.common.quiet);
    let result = if args.dates.is_empty() {
        batch
            .classify_all()
            .await
            .context("Failed to discover observing nights")?
    } else {
        batch.classify_nights(&args.dates).await
    };

    let rendered = match args.common.output_format {
        OutputFormat::Human => output::render_batch(&result),
        OutputFormat::Json => output::batch_json(&result)?,
    };
    emit(&rendered, args.common.output_file.as_deref())?;

    if !result.failed.is_empty() && result.classified.is_empty() {
        anyhow::bail!("No night could be classified");
    }
    Ok(())
}

fn run_nights(args: NightsArgs) -> Result<()> {
    setup_logging(&args.common);
    let config = load_configuration(&args.common)?;

    let nights = NightScanner::new(&config.raw_data_dir)
        .discover_nights()
        .context("Failed to discover observing nights")?;

    let rendered = match args.common.output_format {
        OutputFormat::Human => output::render_nights(&nights),
        OutputFormat::Json => output::nights_json(&nights)?,
    };
    emit(&rendered, args.common.output_file.as_deref())
}

/// Print to stdout or write to a file
fn emit(rendered: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Results written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
