//! Staging layout, run locking and the CSV combiner

use std::path::PathBuf;

pub mod csv;
pub mod lock;
pub mod path;

pub use self::csv::{CombinedResult, Combiner};
pub use lock::RunLock;
pub use path::{recreate_dir, StagingLayout};

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Combine was asked for a vessel that has never been fetched
    #[error("staging directory does not exist: {}", .0.display())]
    NoStagingDir(PathBuf),

    /// Staging and results directories coincide or nest, so clearing one
    /// would delete the other
    #[error(
        "staging directory {} and results directory {} overlap; use separate temp and results roots",
        staging.display(),
        results.display()
    )]
    OverlappingDirs {
        /// Per-vessel staging directory
        staging: PathBuf,
        /// Per-vessel results directory
        results: PathBuf,
    },

    /// IO error
    #[error("IO error at {}: {source}", path.display())]
    IoError {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV read or write error
    #[error("CSV error in {}: {source}", path.display())]
    CsvError {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: ::csv::Error,
    },

    /// Another run holds the lock for this vessel
    #[error("lock error: {0}")]
    LockError(String),
}

impl OutputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: ::csv::Error) -> Self {
        Self::CsvError {
            path: path.into(),
            source,
        }
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
