use analytics::{LeverageThresholds, MetricsProcessor, RegimeAnalyzer};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::{Config, LoggingSettings, OutputFormat, load_config, load_config_from};
use core_types::{DateRange, ProcessedRecord};
use ingestion::{CsvSource, validate_series};
use serde_json::to_string_pretty;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod render;

/// The main entry point for the Marginwatch leverage dashboard backend.
fn main() -> Result<()> {
    // Load MARGINWATCH__* overrides from a .env file, if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    // Held for the lifetime of the program so buffered file logs are flushed.
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Process(args) => handle_process(args, &config),
        Commands::Summary(args) => handle_summary(args, &config),
        Commands::Regime(args) => handle_regime(args, &config),
        Commands::Validate(args) => handle_validate(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Margin debt leverage and risk metrics for a monthly macro-financial series.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (defaults to `config.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fully processed series.
    Process(ProcessArgs),
    /// Print the KPI summary for a date range.
    Summary(RangeArgs),
    /// Print leverage-zone occupancy and the VIX/leverage trend for a date range.
    Regime(RangeArgs),
    /// Check the data file and report its coverage and gaps.
    Validate(DataArgs),
}

#[derive(Parser)]
struct DataArgs {
    /// The market data CSV (defaults to `dashboard.data_path`).
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Parser)]
struct ProcessArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Rolling z-score window in periods (defaults to `metrics.z_score_window`).
    #[arg(long)]
    window: Option<usize>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Parser)]
struct RangeArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Inclusive start of the window (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Inclusive end of the window (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl RangeArgs {
    /// Merges the CLI bounds over the configured default window.
    fn date_range(&self, config: &Config) -> Result<DateRange> {
        let defaults = config.dashboard.date_range();
        let range = DateRange::new(
            self.from.unwrap_or(defaults.start),
            self.to.unwrap_or(defaults.end),
        )?;
        Ok(range)
    }
}

// ==============================================================================
// Logging
// ==============================================================================

/// Console logs go to stderr so that JSON on stdout stays clean.
fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console = fmt::layer().with_writer(std::io::stderr);

    match &settings.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, &settings.file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init()?;
            Ok(None)
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads and validates the raw series, then runs it through the processor.
fn load_processed(
    data: &DataArgs,
    config: &Config,
    window: usize,
) -> Result<(MetricsProcessor, Vec<ProcessedRecord>)> {
    let path = data
        .data
        .clone()
        .unwrap_or_else(|| config.dashboard.data_path.clone());
    let raw = CsvSource::new(&path)
        .load()
        .with_context(|| format!("Failed to load market data from {}", path.display()))?;
    validate_series(&raw).context("Market data failed validation")?;

    let processor = MetricsProcessor::new(config.metrics.clone())?;
    let processed = processor.process_series(&raw, window);
    Ok((processor, processed))
}

fn handle_process(args: ProcessArgs, config: &Config) -> Result<()> {
    let window = args.window.unwrap_or(config.metrics.z_score_window);
    let (_, processed) = load_processed(&args.data, config, window)?;

    match args.format.unwrap_or(config.dashboard.output_format) {
        OutputFormat::Table => println!("{}", render::processed_table(&processed)),
        OutputFormat::Json => println!("{}", to_string_pretty(&processed)?),
    }
    Ok(())
}

fn handle_summary(args: RangeArgs, config: &Config) -> Result<()> {
    let range = args.date_range(config)?;
    let (processor, processed) = load_processed(&args.data, config, config.metrics.z_score_window)?;

    let window = range.select(&processed);
    tracing::info!(
        from = %range.start,
        to = %range.end,
        records = window.len(),
        "Summarizing filtered window."
    );
    let metrics = processor.summarize(&window);

    match args.format.unwrap_or(config.dashboard.output_format) {
        OutputFormat::Table => println!("{}", render::summary_table(&metrics)),
        OutputFormat::Json => println!("{}", to_string_pretty(&metrics)?),
    }
    Ok(())
}

fn handle_regime(args: RangeArgs, config: &Config) -> Result<()> {
    let range = args.date_range(config)?;
    let (_, processed) = load_processed(&args.data, config, config.metrics.z_score_window)?;

    let analyzer = RegimeAnalyzer::new(LeverageThresholds {
        yellow: config.dashboard.leverage_threshold_yellow,
        red: config.dashboard.leverage_threshold_red,
    })?;
    let report = analyzer.analyze(&range.select(&processed));

    match args.format.unwrap_or(config.dashboard.output_format) {
        OutputFormat::Table => println!("{}", render::regime_table(&report)),
        OutputFormat::Json => println!("{}", to_string_pretty(&report)?),
    }
    Ok(())
}

fn handle_validate(args: DataArgs, config: &Config) -> Result<()> {
    let path = args.data.unwrap_or_else(|| config.dashboard.data_path.clone());
    let raw = CsvSource::new(&path)
        .load()
        .with_context(|| format!("Failed to load market data from {}", path.display()))?;
    let report = validate_series(&raw).context("Market data failed validation")?;

    println!("{}", render::series_table(&report));
    Ok(())
}
