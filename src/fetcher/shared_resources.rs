//! Process-wide HTTP client
//!
//! Every chunk request of a run goes through one `reqwest::Client`, so the
//! TLS session and connection to the export host are reused between chunks.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Bound on establishing the TCP/TLS connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("vessel-track-downloader/", env!("CARGO_PKG_VERSION"));

// Exports can take minutes to stream, so there is no overall request timeout.
static TRACK_HTTP_CLIENT: Lazy<Arc<Client>> = Lazy::new(|| Arc::new(build_client()));

fn build_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| panic!("cannot initialise HTTP client (TLS backend unavailable?): {e}"))
}

/// Shared client used by [`super::MarineTrafficClient::new`]
pub fn global_http_client() -> Arc<Client> {
    Arc::clone(&TRACK_HTTP_CLIENT)
}
