//! Remote track sources
//!
//! The chunked fetcher only depends on the [`TrackSource`] trait; the
//! production implementation is [`marinetraffic::MarineTrafficClient`].

use crate::identifier::{ApiKey, Mmsi};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod marinetraffic;
pub mod shared_resources;

pub use marinetraffic::{MarineTrafficClient, MarineTrafficConfig};

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Remote answered with a non-success status
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// Transport failure (DNS, connect, TLS, body read)
    #[error("network error: {0}")]
    NetworkError(String),

    /// Request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Export format requested from the track API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Comma separated values
    #[default]
    Csv,
    /// JSON array of arrays
    Json,
    /// JSON array of objects
    Jsono,
    /// XML document
    Xml,
}

impl Protocol {
    /// Query parameter value, also used as the staged file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Csv => "csv",
            Protocol::Json => "json",
            Protocol::Jsono => "jsono",
            Protocol::Xml => "xml",
        }
    }

    /// Whether staged files in this format can be merged by the combiner
    pub fn is_combinable(&self) -> bool {
        matches!(self, Protocol::Csv)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Protocol::Csv),
            "json" => Ok(Protocol::Json),
            "jsono" => Ok(Protocol::Jsono),
            "xml" => Ok(Protocol::Xml),
            _ => Err(format!(
                "Invalid protocol: {s}. Valid options: csv, json, jsono, xml"
            )),
        }
    }
}

/// One track export request: a vessel and an inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRequest<'a> {
    /// Vessel to export
    pub mmsi: &'a Mmsi,
    /// First day (inclusive)
    pub from: NaiveDate,
    /// Last day (inclusive)
    pub to: NaiveDate,
}

/// Source of raw vessel track exports
#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Fetch one export and return the raw response body
    ///
    /// # Errors
    /// Any non-2xx status or transport failure.
    async fn fetch_track(&self, api_key: &ApiKey, request: &TrackRequest<'_>) -> FetcherResult<Bytes>;

    /// Format of the bodies returned by [`TrackSource::fetch_track`]
    fn protocol(&self) -> Protocol;
}
