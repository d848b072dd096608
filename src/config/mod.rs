//! Runtime configuration
//!
//! Defaults describe an observer in Atlanta watching the ISS in real time.
//! Values can come from JSON or from `SKYCLOCK_*` environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `SKYCLOCK_LATITUDE` | `latitude_degrees` |
//! | `SKYCLOCK_LONGITUDE` | `longitude_degrees` |
//! | `SKYCLOCK_UTC_OFFSET_MINUTES` | `utc_offset_minutes` |
//! | `SKYCLOCK_TIME_OFFSET_MS` | `time_offset_ms` |
//! | `SKYCLOCK_SPEED` | `speed` |
//! | `SKYCLOCK_FRAME_DELAY_MS` | `frame_delay_ms` |
//! | `SKYCLOCK_FEED_URL` | `satellite_feed_url` |
//! | `SKYCLOCK_POLL_INTERVAL_MS` | `satellite_poll_interval_ms` |
//! | `SKYCLOCK_FEED_TIMEOUT_SECS` | `feed_timeout_secs` |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::feed::ISS_FEED_URL;
use crate::time::SimClock;
use crate::toposlib::Observer;
use crate::{Result, SkyclockError};

/// Scene-space distance at which each kind of body is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDistances {
    pub sun: f64,
    pub moon: f64,
    pub planets: f64,
    pub satellite: f64,
}

impl Default for BodyDistances {
    fn default() -> Self {
        BodyDistances {
            sun: 6.0,
            moon: 5.6,
            planets: 6.0,
            satellite: 5.4,
        }
    }
}

/// Everything needed to drive the sky for one observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub latitude_degrees: f64,
    pub longitude_degrees: f64,
    /// Display offset from UTC, minutes east
    pub utc_offset_minutes: i32,
    /// Initial lead of the simulated clock over wall time
    pub time_offset_ms: i64,
    /// Simulated seconds per real second
    pub speed: f64,
    pub frame_delay_ms: u64,
    pub satellite_feed_url: String,
    pub satellite_poll_interval_ms: u64,
    pub feed_timeout_secs: u64,
    pub distances: BodyDistances,
}

impl Default for SkyConfig {
    fn default() -> Self {
        SkyConfig {
            latitude_degrees: 33.7695,
            longitude_degrees: -84.3857,
            utc_offset_minutes: 0,
            time_offset_ms: 0,
            speed: 1.0,
            frame_delay_ms: 25,
            satellite_feed_url: ISS_FEED_URL.to_string(),
            satellite_poll_interval_ms: 2000,
            feed_timeout_secs: 10,
            distances: BodyDistances::default(),
        }
    }
}

impl SkyConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SkyclockError::ConfigError(format!("Invalid configuration JSON: {}", e)))
    }

    /// Defaults overridden by any `SKYCLOCK_*` environment variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`SkyConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SkyConfig::default();
        override_with(&lookup, "SKYCLOCK_LATITUDE", &mut config.latitude_degrees)?;
        override_with(&lookup, "SKYCLOCK_LONGITUDE", &mut config.longitude_degrees)?;
        override_with(&lookup, "SKYCLOCK_UTC_OFFSET_MINUTES", &mut config.utc_offset_minutes)?;
        override_with(&lookup, "SKYCLOCK_TIME_OFFSET_MS", &mut config.time_offset_ms)?;
        override_with(&lookup, "SKYCLOCK_SPEED", &mut config.speed)?;
        override_with(&lookup, "SKYCLOCK_FRAME_DELAY_MS", &mut config.frame_delay_ms)?;
        override_with(&lookup, "SKYCLOCK_FEED_URL", &mut config.satellite_feed_url)?;
        override_with(&lookup, "SKYCLOCK_POLL_INTERVAL_MS", &mut config.satellite_poll_interval_ms)?;
        override_with(&lookup, "SKYCLOCK_FEED_TIMEOUT_SECS", &mut config.feed_timeout_secs)?;
        Ok(config)
    }

    /// The configured observer, latitude clamped
    pub fn observer(&self) -> Observer {
        Observer::new(self.latitude_degrees, self.longitude_degrees)
    }

    /// A simulated clock starting at the configured offset and speed
    pub fn sim_clock(&self) -> SimClock {
        SimClock::new(self.time_offset_ms, self.speed, self.utc_offset_minutes)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.satellite_poll_interval_ms)
    }
}

fn override_with<F, T>(lookup: &F, key: &str, field: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key) {
        *field = raw
            .trim()
            .parse()
            .map_err(|e| SkyclockError::ConfigError(format!("{}={:?}: {}", key, raw, e)))?;
    }
    Ok(())
}
