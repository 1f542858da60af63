//! MarineTraffic vessel track export client
//!
//! Issues `GET {base_url}/{api_key}?v=..&fromdate=..&todate=..&MMSI=..&protocol=..`
//! and hands back the body untouched. No retries: a failed chunk fails the run.

use bytes::Bytes;
use reqwest::{Client, Request};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::shared_resources::global_http_client;
use super::{FetcherError, FetcherResult, Protocol, TrackRequest, TrackSource};
use crate::identifier::ApiKey;
use crate::range::DATE_FORMAT;
use async_trait::async_trait;

/// Production export endpoint; the API key is appended as a path segment
pub const DEFAULT_BASE_URL: &str = "https://services.marinetraffic.com/api/exportvesseltrack";

/// Export API version
pub const DEFAULT_API_VERSION: u32 = 3;

/// Longest error body echoed back in [`FetcherError::HttpStatus`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Endpoint settings for the export API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarineTrafficConfig {
    /// Base URL without the key segment
    pub base_url: String,
    /// Value of the `v` query parameter
    pub version: u32,
    /// Value of the `protocol` query parameter
    pub protocol: Protocol,
}

impl Default for MarineTrafficConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION,
            protocol: Protocol::Csv,
        }
    }
}

/// HTTP client for the vessel track export endpoint
pub struct MarineTrafficClient {
    client: Arc<Client>,
    config: MarineTrafficConfig,
}

impl MarineTrafficClient {
    /// Create a client on the shared global connection pool
    pub fn new(config: MarineTrafficConfig) -> Self {
        Self::with_client(global_http_client(), config)
    }

    /// Create a client with an explicit `reqwest` client
    pub fn with_client(client: Arc<Client>, config: MarineTrafficConfig) -> Self {
        Self { client, config }
    }

    /// Endpoint settings in use
    pub fn config(&self) -> &MarineTrafficConfig {
        &self.config
    }

    /// Build the export request without sending it
    pub fn build_request(&self, api_key: &ApiKey, request: &TrackRequest<'_>) -> FetcherResult<Request> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            api_key.expose()
        );

        let params = [
            ("v", self.config.version.to_string()),
            ("fromdate", request.from.format(DATE_FORMAT).to_string()),
            ("todate", request.to.format(DATE_FORMAT).to_string()),
            ("MMSI", request.mmsi.to_string()),
            ("protocol", self.config.protocol.to_string()),
        ];

        self.client
            .get(url)
            .query(&params)
            .build()
            .map_err(|e| FetcherError::InvalidRequest(e.without_url().to_string()))
    }
}

#[async_trait]
impl TrackSource for MarineTrafficClient {
    async fn fetch_track(&self, api_key: &ApiKey, request: &TrackRequest<'_>) -> FetcherResult<Bytes> {
        let http_request = self.build_request(api_key, request)?;

        debug!(
            mmsi = %request.mmsi,
            from = %request.from,
            to = %request.to,
            "Requesting vessel track export"
        );

        // without_url() keeps the API key out of error messages
        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| FetcherError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!(status = status.as_u16(), "Track export request rejected");
            return Err(FetcherError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| FetcherError::NetworkError(e.without_url().to_string()))
    }

    fn protocol(&self) -> Protocol {
        self.config.protocol
    }
}
