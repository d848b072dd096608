//! HTTP client for the wheretheiss.at satellite position feed
//!
//! One GET per poll, returning JSON like
//!
//! ```text
//! {"name":"iss","id":25544,"latitude":50.11,"longitude":118.07,"altitude":408.05,...}
//! ```
//!
//! Only `latitude`, `longitude` and `altitude` are read.

use std::time::Duration;

use crate::config::SkyConfig;
use crate::satellitelib::{FixSource, SatelliteFix};
use crate::{Result, SkyclockError};

/// Feed URL for the International Space Station (NORAD 25544)
pub const ISS_FEED_URL: &str = "https://api.wheretheiss.at/v1/satellites/25544";

/// Blocking client for one satellite's position endpoint
#[derive(Debug, Clone)]
pub struct WhereTheIssClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl WhereTheIssClient {
    /// Create a client for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SkyclockError::FeedError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(WhereTheIssClient {
            client,
            url: url.into(),
        })
    }

    /// Client for the configured feed URL and timeout
    pub fn from_config(config: &SkyConfig) -> Result<Self> {
        Self::new(
            config.satellite_feed_url.clone(),
            Duration::from_secs(config.feed_timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode one fix.
    pub fn fetch_fix(&self) -> Result<SatelliteFix> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| SkyclockError::FeedError(format!("Failed to fetch {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(SkyclockError::FeedError(format!(
                "Feed {} answered with status {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| SkyclockError::FeedError(format!("Failed to read response: {}", e)))?;
        parse_fix(&body)
    }
}

impl FixSource for WhereTheIssClient {
    fn fetch(&self) -> Result<SatelliteFix> {
        self.fetch_fix()
    }
}

/// Decode a feed payload into a fix.
pub fn parse_fix(body: &str) -> Result<SatelliteFix> {
    serde_json::from_str(body)
        .map_err(|e| SkyclockError::DataError(format!("Malformed satellite payload: {}", e)))
}
