//! `run` and `combine` command implementations

use crate::config::AppConfig;
use crate::downloader::{ChunkedFetcher, FetchReport};
use crate::fetcher::MarineTrafficClient;
use crate::output::{CombinedResult, Combiner, OutputError, RunLock};
use crate::range::{local_today, DateRange};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info, warn};

use super::{CliError, ValidateArgs};

/// Config file read when `--config` is not given; may be absent
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Vessel Track Downloader CLI
#[derive(Parser, Debug)]
#[command(name = "vessel-track")]
#[command(about = "Download MarineTraffic vessel track history and merge it into one CSV", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// YAML config file (default: ./config.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json or human)
    #[arg(long, global = true, default_value = "human")]
    pub output_format: OutputFormat,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the range, fetch every chunk, then combine them
    Run(RunArgs),

    /// Combine already staged chunks without fetching
    Combine(CombineArgs),

    /// Validate a date range and show the chunk plan
    Validate(ValidateArgs),
}

/// Command line overrides for config values
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Vessel MMSI (nine digits)
    #[arg(long)]
    pub mmsi: Option<String>,

    /// First day to fetch (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day to fetch (YYYY-MM-DD), must be before today
    #[arg(long)]
    pub end_date: Option<String>,

    /// Root directory for per-vessel staging directories
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Root directory for combined results
    #[arg(long)]
    pub results_dir: Option<PathBuf>,
}

impl Overrides {
    /// Apply every flag that was given
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(mmsi) = &self.mmsi {
            config.vessel.mmsi = Some(mmsi.clone());
        }
        if let Some(start) = &self.start_date {
            config.vessel.start_date = Some(start.clone());
        }
        if let Some(end) = &self.end_date {
            config.vessel.end_date = Some(end.clone());
        }
        if let Some(dir) = &self.temp_dir {
            config.paths.temp_dir = dir.clone();
        }
        if let Some(dir) = &self.results_dir {
            config.paths.results_dir = dir.clone();
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

impl Cli {
    /// Resolve configuration: file, then `.env` and environment, then flags
    pub fn load_config(&self, overrides: &Overrides) -> Result<AppConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path, true)?,
            None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };

        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }
        config.apply_env(|key| std::env::var(key).ok());
        overrides.apply(&mut config);

        Ok(config)
    }
}

/// Arguments for the `run` command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Config overrides
    #[command(flatten)]
    pub overrides: Overrides,
}

impl RunArgs {
    /// Validate, fetch all chunks, then combine
    ///
    /// Nothing touches the network or filesystem until the range is valid. A
    /// failed fetch returns early and the combiner is not run.
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let config = cli.load_config(&self.overrides)?;
        let mmsi = config.mmsi()?;
        let api_key = config.api_key()?;
        let (start, end) = config.date_bounds()?;

        let range = DateRange::new(start, end, local_today()).inspect_err(|e| {
            error!("Error: {}", e);
        })?;
        info!("Correct, total days: {}", range.days());

        let layout = config.layout();
        layout.ensure_disjoint(&mmsi)?;
        let mut lock = RunLock::open(&layout.lock_path(&mmsi))?;
        let _guard = lock.try_acquire()?;

        let endpoint = config.api.endpoint.clone();
        let protocol = endpoint.protocol;
        let fetcher = ChunkedFetcher::new(MarineTrafficClient::new(endpoint), layout.clone())
            .with_cooldown_interval(config.cooldown());
        let fetcher = fetcher.with_progress(create_progress_bar(cli.output_format));

        let report = fetcher.fetch(&api_key, &mmsi, &range).await.inspect_err(|e| {
            error!("Failed to download vessel track data, combine skipped: {}", e);
        })?;

        let combined = if protocol.is_combinable() {
            Some(Combiner::new(layout).combine(&mmsi)?)
        } else {
            warn!(
                "Protocol '{}' is not CSV; chunks left in {} without combining",
                protocol,
                report.staging_dir.display()
            );
            None
        };

        match cli.output_format {
            OutputFormat::Json => output_json(&mmsi.to_string(), &range, Some(&report), combined.as_ref()),
            OutputFormat::Human => {
                output_human_fetch(&range, &report);
                if let Some(combined) = &combined {
                    output_human_combine(combined);
                }
                Ok(())
            }
        }
    }
}

/// Arguments for the `combine` command
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Config overrides (only the MMSI and directories are used)
    #[command(flatten)]
    pub overrides: Overrides,
}

impl CombineArgs {
    /// Combine the staged chunks of one vessel
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let config = cli.load_config(&self.overrides)?;
        let mmsi = config.mmsi()?;
        let layout = config.layout();

        // Nothing is created, not even the lock file, when there is nothing to combine
        let staging_dir = layout.staging_dir(&mmsi);
        if !staging_dir.is_dir() {
            let e = OutputError::NoStagingDir(staging_dir);
            error!("Combine failed: {}", e);
            return Err(e.into());
        }

        let mut lock = RunLock::open(&layout.lock_path(&mmsi))?;
        let _guard = lock.try_acquire()?;

        let combined = Combiner::new(layout).combine(&mmsi).inspect_err(|e| {
            error!("Combine failed: {}", e);
        })?;

        match cli.output_format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "success": true,
                    "mmsi": mmsi.to_string(),
                    "combined": combined,
                });
                print_json(&output)
            }
            OutputFormat::Human => {
                output_human_combine(&combined);
                Ok(())
            }
        }
    }
}

// ─── Output ──────────────────────────────────────────────────────────────────

fn output_json(
    mmsi: &str,
    range: &DateRange,
    report: Option<&FetchReport>,
    combined: Option<&CombinedResult>,
) -> Result<(), CliError> {
    let output = serde_json::json!({
        "success": true,
        "mmsi": mmsi,
        "start_date": range.start(),
        "end_date": range.end(),
        "days": range.days(),
        "fetch": report,
        "combined": combined,
    });
    print_json(&output)
}

fn print_json(output: &serde_json::Value) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string(output).map_err(|e| CliError::ReportError(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn output_human_fetch(range: &DateRange, report: &FetchReport) {
    println!("\nFetch completed successfully!");
    println!("Range: {} ({} days)", range, range.days());
    println!("Chunks: {}", report.chunks.len());
    println!("Bytes downloaded: {}", report.bytes_written);
    println!("Staging: {}", report.staging_dir.display());
}

fn output_human_combine(combined: &CombinedResult) {
    println!("\nCombine completed successfully!");
    println!("Output: {}", combined.path.display());
    println!("Files merged: {}", combined.files_merged);
    println!("Rows written: {}", combined.rows_written);
    if !combined.empty_files.is_empty() {
        println!("Empty files skipped: {}", combined.empty_files.join(", "));
    }
}

// ─── Progress bar ────────────────────────────────────────────────────────────

fn create_progress_bar(format: OutputFormat) -> ProgressBar {
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
