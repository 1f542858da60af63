//! Chunked fetcher: sequential, cooled-down chunk downloads into staging

use crate::downloader::chunk::{Chunk, ChunkPlan};
use crate::downloader::config::{default_cooldown, MAX_CHUNK_DAYS};
use crate::downloader::cooldown::{Cooldown, TokioCooldown};
use crate::downloader::DownloadError;
use crate::fetcher::{TrackRequest, TrackSource};
use crate::identifier::{ApiKey, Mmsi};
use crate::output::{recreate_dir, StagingLayout};
use crate::range::DateRange;
use indicatif::ProgressBar;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Outcome of a successful fetch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    /// Per-vessel staging directory holding the chunk files
    pub staging_dir: PathBuf,
    /// Chunks fetched, in order
    pub chunks: Vec<Chunk>,
    /// Staged file for each chunk, in the same order
    pub staged_files: Vec<PathBuf>,
    /// Total bytes written across all chunks
    pub bytes_written: u64,
}

/// Downloads a date range chunk by chunk into the staging directory
///
/// Chunks are fetched strictly one after another with a cooldown in between.
/// The first failing chunk ends the run; chunks already staged are kept for
/// inspection and nothing is retried.
pub struct ChunkedFetcher<S, C = TokioCooldown> {
    source: S,
    cooldown: C,
    layout: StagingLayout,
    cooldown_interval: Duration,
    max_chunk_days: u32,
    progress: ProgressBar,
}

impl<S: TrackSource> ChunkedFetcher<S, TokioCooldown> {
    /// Create a fetcher that sleeps in real time between chunks
    pub fn new(source: S, layout: StagingLayout) -> Self {
        Self::with_cooldown(source, TokioCooldown, layout)
    }
}

impl<S: TrackSource, C: Cooldown> ChunkedFetcher<S, C> {
    /// Create a fetcher with a custom cooldown implementation
    pub fn with_cooldown(source: S, cooldown: C, layout: StagingLayout) -> Self {
        Self {
            source,
            cooldown,
            layout,
            cooldown_interval: default_cooldown(),
            max_chunk_days: MAX_CHUNK_DAYS,
            progress: ProgressBar::hidden(),
        }
    }

    /// Override the pause between chunks
    pub fn with_cooldown_interval(mut self, interval: Duration) -> Self {
        self.cooldown_interval = interval;
        self
    }

    /// Override the maximum chunk span in days
    pub fn with_max_chunk_days(mut self, max_chunk_days: u32) -> Self {
        self.max_chunk_days = max_chunk_days;
        self
    }

    /// Report chunk progress on an `indicatif` bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Chunks this fetcher would request for `range`
    pub fn plan(&self, range: &DateRange) -> ChunkPlan {
        ChunkPlan::new(range, self.max_chunk_days)
    }

    /// Fetch `range` for `mmsi` into a freshly cleared staging directory
    ///
    /// # Errors
    /// - [`DownloadError::Output`] if the staging directory overlaps the
    ///   results directory or cannot be reset
    /// - [`DownloadError::Fetch`] on the first chunk whose request fails
    /// - [`DownloadError::Io`] if a chunk body cannot be written
    pub async fn fetch(
        &self,
        api_key: &ApiKey,
        mmsi: &Mmsi,
        range: &DateRange,
    ) -> Result<FetchReport, DownloadError> {
        self.layout.ensure_disjoint(mmsi)?;
        let staging_dir = self.layout.staging_dir(mmsi);
        recreate_dir(&staging_dir)?;

        let plan = self.plan(range);
        let total = plan.len();
        if total > 1 {
            info!(
                "Interval is {} days (> {}), splitting into {} requests",
                range.days(),
                self.max_chunk_days,
                total
            );
        }
        info!(%mmsi, range = %range, "Fetching vessel track");

        self.progress.set_length(total as u64);
        self.progress.set_position(0);

        let protocol = self.source.protocol();
        let mut report = FetchReport {
            staging_dir,
            chunks: Vec::with_capacity(total),
            staged_files: Vec::with_capacity(total),
            bytes_written: 0,
        };

        let mut chunks = plan.peekable();
        while let Some(chunk) = chunks.next() {
            self.progress.set_message(format!("{chunk}"));
            info!("Fetching chunk: {}", chunk);

            let request = TrackRequest {
                mmsi,
                from: chunk.from,
                to: chunk.to,
            };
            let body = self
                .source
                .fetch_track(api_key, &request)
                .await
                .map_err(|source| {
                    error!(chunk = %chunk, error = %source, "Failed to download vessel track data");
                    DownloadError::Fetch { chunk, source }
                })?;

            let path = self.layout.staged_file_path(mmsi, &chunk, protocol);
            tokio::fs::write(&path, &body)
                .await
                .map_err(|source| DownloadError::Io {
                    path: path.clone(),
                    source,
                })?;
            info!(bytes = body.len(), "Successfully downloaded: {}", path.display());

            report.bytes_written += body.len() as u64;
            report.chunks.push(chunk);
            report.staged_files.push(path);
            self.progress.inc(1);

            if chunks.peek().is_some() {
                info!(
                    "Sleeping for {} seconds between chunks...",
                    self.cooldown_interval.as_secs()
                );
                self.progress
                    .set_message(format!("cooling down {}s", self.cooldown_interval.as_secs()));
                self.cooldown.wait(self.cooldown_interval).await;
            }
        }

        self.progress.finish_with_message("done");
        Ok(report)
    }
}
