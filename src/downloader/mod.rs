//! Chunked download orchestration
//!
//! # Overview
//!
//! 1. **Planning**: split a [`crate::range::DateRange`] into API-sized
//!    [`chunk::Chunk`]s with [`chunk::ChunkPlan`]
//! 2. **Fetching**: [`executor::ChunkedFetcher`] requests each chunk in order
//!    and writes the raw body to the staging directory
//! 3. **Cooldown**: a [`cooldown::Cooldown`] pause separates consecutive
//!    requests
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use vessel_track_downloader::downloader::ChunkedFetcher;
//! use vessel_track_downloader::fetcher::{MarineTrafficClient, MarineTrafficConfig};
//! use vessel_track_downloader::identifier::{ApiKey, Mmsi};
//! use vessel_track_downloader::output::StagingLayout;
//! use vessel_track_downloader::range::{local_today, DateRange};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let range = DateRange::new("2022-01-08", "2023-01-08", local_today())?;
//! let fetcher = ChunkedFetcher::new(
//!     MarineTrafficClient::new(MarineTrafficConfig::default()),
//!     StagingLayout::new("./temp", "./results"),
//! );
//! let report = fetcher
//!     .fetch(&ApiKey::new("my-key")?, &Mmsi::parse("538007475")?, &range)
//!     .await?;
//! println!("staged {} chunks in {}", report.chunks.len(), report.staging_dir.display());
//! # Ok(())
//! # }
//! ```

use crate::fetcher::FetcherError;
use crate::output::OutputError;
use std::path::PathBuf;

pub mod chunk;
pub mod config;
pub mod cooldown;
pub mod executor;

pub use chunk::{Chunk, ChunkPlan};
pub use cooldown::{Cooldown, TokioCooldown};
pub use executor::{ChunkedFetcher, FetchReport};

/// Download errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A chunk request failed; later chunks were not attempted
    #[error("failed to fetch chunk {chunk}: {source}")]
    Fetch {
        /// Chunk that failed
        chunk: Chunk,
        /// Underlying fetch error
        #[source]
        source: FetcherError,
    },

    /// A chunk body could not be written to staging
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        /// Staged file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Staging directory could not be reset
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}
