//! Pause between chunk requests
//!
//! The export endpoint has no published quota, only an implied one, so the
//! fetcher simply waits a fixed interval between calls. The wait goes through
//! the [`Cooldown`] trait so tests can run multi-chunk fetches instantly.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Something that can suspend the fetch loop for a given duration
#[async_trait]
pub trait Cooldown: Send + Sync {
    /// Wait for `duration` before the next request
    async fn wait(&self, duration: Duration);
}

/// Real-time cooldown backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCooldown;

#[async_trait]
impl Cooldown for TokioCooldown {
    async fn wait(&self, duration: Duration) {
        sleep(duration).await;
    }
}
