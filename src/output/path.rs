//! Deterministic file layout for staging and results
//!
//! ```text
//! {temp_root}/vessel_track_{mmsi}/vessel_track_{mmsi}_{from}_{to}.{protocol}
//! {results_root}/vessel_track_{mmsi}/vessel_track_{mmsi}_combined.csv
//! ```
//!
//! # Usage Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use std::path::PathBuf;
//! use vessel_track_downloader::downloader::Chunk;
//! use vessel_track_downloader::fetcher::Protocol;
//! use vessel_track_downloader::identifier::Mmsi;
//! use vessel_track_downloader::output::StagingLayout;
//!
//! let layout = StagingLayout::new(PathBuf::from("temp"), PathBuf::from("results"));
//! let mmsi = Mmsi::parse("538007475").unwrap();
//! let chunk = Chunk {
//!     from: NaiveDate::from_ymd_opt(2022, 1, 8).unwrap(),
//!     to: NaiveDate::from_ymd_opt(2022, 7, 7).unwrap(),
//! };
//!
//! let path = layout.staged_file_path(&mmsi, &chunk, Protocol::Csv);
//! assert_eq!(
//!     path,
//!     PathBuf::from("temp/vessel_track_538007475/vessel_track_538007475_2022-01-08_2022-07-07.csv")
//! );
//! ```

use super::{OutputError, OutputResult};
use crate::downloader::Chunk;
use crate::fetcher::Protocol;
use crate::identifier::Mmsi;
use chrono::{Datelike, NaiveDate};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Prefix shared by staging directories and every file name
const PREFIX: &str = "vessel_track";

/// Extension of the files the combiner reads and writes
pub const CSV_EXTENSION: &str = "csv";

/// Staging and results roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    temp_root: PathBuf,
    results_root: PathBuf,
}

impl StagingLayout {
    /// Create a layout over the given roots
    pub fn new(temp_root: impl Into<PathBuf>, results_root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: temp_root.into(),
            results_root: results_root.into(),
        }
    }

    /// Root for per-vessel staging directories
    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    /// Root for per-vessel result directories
    pub fn results_root(&self) -> &Path {
        &self.results_root
    }

    /// `{temp_root}/vessel_track_{mmsi}`
    pub fn staging_dir(&self, mmsi: &Mmsi) -> PathBuf {
        self.temp_root.join(vessel_dir_name(mmsi))
    }

    /// `{results_root}/vessel_track_{mmsi}`
    pub fn results_dir(&self, mmsi: &Mmsi) -> PathBuf {
        self.results_root.join(vessel_dir_name(mmsi))
    }

    /// `{temp_root}/vessel_track_{mmsi}.lock`
    pub fn lock_path(&self, mmsi: &Mmsi) -> PathBuf {
        self.temp_root.join(format!("{}.lock", vessel_dir_name(mmsi)))
    }

    /// Full path of the staged file for one chunk
    pub fn staged_file_path(&self, mmsi: &Mmsi, chunk: &Chunk, protocol: Protocol) -> PathBuf {
        self.staging_dir(mmsi)
            .join(staged_file_name(mmsi, chunk, protocol))
    }

    /// Full path of the combined result
    pub fn combined_file_path(&self, mmsi: &Mmsi) -> PathBuf {
        self.results_dir(mmsi).join(combined_file_name(mmsi))
    }

    /// Fail if the staging and results directories of `mmsi` are the same
    /// directory or one lies inside the other
    ///
    /// Both directories are wiped with [`recreate_dir`], so an overlap would
    /// delete staged chunks before they are combined.
    pub fn ensure_disjoint(&self, mmsi: &Mmsi) -> OutputResult<()> {
        let staging = self.staging_dir(mmsi);
        let results = self.results_dir(mmsi);
        let (a, b) = (normalized(&staging), normalized(&results));

        if a.starts_with(&b) || b.starts_with(&a) {
            return Err(OutputError::OverlappingDirs { staging, results });
        }
        Ok(())
    }
}

/// Absolute, lexically normalized form of `path` (no filesystem access)
fn normalized(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn vessel_dir_name(mmsi: &Mmsi) -> String {
    format!("{PREFIX}_{mmsi}")
}

/// `vessel_track_{mmsi}_{from}_{to}.{protocol}`
///
/// Dates are always written as zero-padded `YYYY-MM-DD`, so sorting staged
/// names lexicographically sorts them chronologically. The combiner relies on
/// this.
pub fn staged_file_name(mmsi: &Mmsi, chunk: &Chunk, protocol: Protocol) -> String {
    format!(
        "{PREFIX}_{mmsi}_{}_{}.{protocol}",
        fixed_width_date(chunk.from),
        fixed_width_date(chunk.to)
    )
}

/// `vessel_track_{mmsi}_combined.csv`
pub fn combined_file_name(mmsi: &Mmsi) -> String {
    format!("{PREFIX}_{mmsi}_combined.{CSV_EXTENSION}")
}

fn fixed_width_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Delete `dir` if it exists and create it again, empty
pub fn recreate_dir(dir: &Path) -> OutputResult<()> {
    if dir.exists() {
        debug!("Clearing directory: {}", dir.display());
        std::fs::remove_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
    }

    std::fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))
}
