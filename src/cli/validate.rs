//! `validate` command: check a date range and preview its chunks

use crate::downloader::config::MAX_CHUNK_DAYS;
use crate::downloader::{Chunk, ChunkPlan};
use crate::range::{local_today, DateRange};
use clap::Args;
use tracing::error;

use super::{Cli, CliError, OutputFormat, Overrides};

/// Validate a date range without fetching anything
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Range to validate (falls back to config/environment)
    #[command(flatten)]
    pub overrides: Overrides,
}

impl ValidateArgs {
    /// Execute the validation command
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let config = cli.load_config(&self.overrides)?;
        let (start, end) = config.date_bounds()?;

        let range = match DateRange::new(start, end, local_today()) {
            Ok(range) => range,
            Err(e) => {
                error!("Error: {}", e);
                return Err(e.into());
            }
        };
        let chunks: Vec<Chunk> = ChunkPlan::new(&range, MAX_CHUNK_DAYS).collect();

        match cli.output_format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": true,
                    "start_date": range.start(),
                    "end_date": range.end(),
                    "days": range.days(),
                    "chunks": chunks,
                });
                let rendered = serde_json::to_string(&output)
                    .map_err(|e| CliError::ReportError(e.to_string()))?;
                println!("{rendered}");
            }
            OutputFormat::Human => {
                println!("Correct, total days: {}", range.days());
                println!("Requests needed: {}", chunks.len());
                for (i, chunk) in chunks.iter().enumerate() {
                    println!("  {:>3}. {} ({} days)", i + 1, chunk, chunk.days());
                }
            }
        }

        Ok(())
    }
}
