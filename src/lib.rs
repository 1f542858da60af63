//! # Vessel Track Downloader Library
//!
//! Downloads vessel track history from the MarineTraffic export API for one
//! vessel, in chunks the API accepts, and merges the chunks into a single CSV.
//!
//! ## Features
//!
//! - **Range Validation**: rejects inverted ranges and ranges ending today
//! - **Chunking**: splits long ranges into gapless spans of at most 180 days
//! - **Cooldown**: fixed, injectable pause between consecutive requests
//! - **Staging**: one raw file per chunk in a per-vessel directory, cleared on every run
//! - **Combining**: ordered concatenation of staged CSVs with a single header
//!
//! ## Quick Start
//!
//! ```no_run
//! use vessel_track_downloader::downloader::ChunkedFetcher;
//! use vessel_track_downloader::fetcher::{MarineTrafficClient, MarineTrafficConfig};
//! use vessel_track_downloader::identifier::{ApiKey, Mmsi};
//! use vessel_track_downloader::output::{Combiner, StagingLayout};
//! use vessel_track_downloader::range::{local_today, DateRange};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mmsi = Mmsi::parse("538007475")?;
//! let range = DateRange::new("2022-01-08", "2025-12-26", local_today())?;
//! let layout = StagingLayout::new("./temp", "./results");
//!
//! let fetcher = ChunkedFetcher::new(
//!     MarineTrafficClient::new(MarineTrafficConfig::default()),
//!     layout.clone(),
//! );
//! fetcher.fetch(&ApiKey::new("my-key")?, &mmsi, &range).await?;
//!
//! let combined = Combiner::new(layout).combine(&mmsi)?;
//! println!("{} rows in {}", combined.rows_written, combined.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`range`] - Date parsing and range validation
//! - [`fetcher`] - Remote track sources (MarineTraffic HTTP client)
//! - [`downloader`] - Chunk planning, cooldown and the sequential fetch loop
//! - [`output`] - Staging layout, run lock and CSV combiner
//! - [`config`] - YAML/environment configuration
//! - [`cli`] - Command line front end

#![warn(missing_docs)]
#![warn(clippy::all)]

/// CLI command implementations
pub mod cli;

/// Layered configuration
pub mod config;

/// Chunked download orchestration
pub mod downloader;

/// Remote track sources
pub mod fetcher;

/// Vessel identifier and API key types
pub mod identifier;

/// Staging, locking and combining
pub mod output;

/// Date range validation
pub mod range;

// Re-export commonly used types
pub use identifier::{ApiKey, Mmsi};
pub use range::DateRange;
