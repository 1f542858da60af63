//! Download configuration constants

use std::time::Duration;

/// Longest span, in days, the export API accepts for one request.
/// A chunk covers `from..=to` with `to - from <= MAX_CHUNK_DAYS`.
pub const MAX_CHUNK_DAYS: u32 = 180;

/// Pause between consecutive chunk requests, in seconds.
/// The export endpoint throttles back-to-back calls for the same key.
pub const DEFAULT_COOLDOWN_SECS: u64 = 60;

/// Pause between consecutive chunk requests
pub const fn default_cooldown() -> Duration {
    Duration::from_secs(DEFAULT_COOLDOWN_SECS)
}
