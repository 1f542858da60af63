//! Vessel identifier and API credential types
//!
//! Implements the MMSI format (nine ASCII digits) used as the fetch and
//! staging key, plus a redacting wrapper for the MarineTraffic API key.

use std::fmt;
use std::str::FromStr;

/// Number of digits in a Maritime Mobile Service Identity
pub const MMSI_LEN: usize = 9;

/// Maritime Mobile Service Identity
///
/// Always exactly nine ASCII digits, so it can be embedded verbatim in file
/// names and query strings.
///
/// # Examples
///
/// ```
/// use vessel_track_downloader::identifier::Mmsi;
///
/// let mmsi = Mmsi::parse(" 538007475 ").unwrap();
/// assert_eq!(mmsi.as_str(), "538007475");
/// assert!(Mmsi::parse("53800747").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mmsi(String);

impl Mmsi {
    /// Parse an MMSI string
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty, contains anything other than
    /// ASCII digits, or is not nine digits long.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::InvalidMmsi(
                "MMSI cannot be empty".to_string(),
            ));
        }

        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdentifierError::InvalidMmsi(format!(
                "MMSI must contain only digits, got '{trimmed}'"
            )));
        }

        if trimmed.len() != MMSI_LEN {
            return Err(IdentifierError::InvalidMmsi(format!(
                "MMSI must be {MMSI_LEN} digits, got {} ('{trimmed}')",
                trimmed.len()
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the digits
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Mmsi {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// MarineTraffic API key
///
/// The key travels in the request path, so `Debug` and `Display` never print
/// it; use [`ApiKey::expose`] where the raw value is required.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key, rejecting blank values
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::InvalidApiKey(
                "API key cannot be empty".to_string(),
            ));
        }
        if trimmed.contains(['/', '?', '#']) || trimmed.chars().any(char::is_whitespace) {
            return Err(IdentifierError::InvalidApiKey(
                "API key contains characters that are not allowed in a URL path segment"
                    .to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw key value, for building the request URL only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Errors that can occur while parsing identifiers
#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
    /// Malformed MMSI
    #[error("invalid MMSI: {0}")]
    InvalidMmsi(String),

    /// Malformed API key
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),
}
