//! Skyclock: a wall-clock driven sky for an observer on Earth
//!
//! Converts an instant and a geographic position into topocentric
//! altitude/azimuth coordinates for the Sun, the Moon, the eight classical
//! planets (Pluto included) and a tracked Earth satellite, together with
//! the lighting scalars a renderer derives from them.
//!
//! The astronomy is deliberately low order: fixed J2000-era orbital
//! elements, a truncated equation of the centre instead of an iterative
//! Kepler solve, and short series for the Sun and Moon. Expect positions
//! good to a degree or so, which is plenty for placing bodies in a scene.
//!
//! # Example
//!
//! ```ignore
//! use skyclock::time::Instant;
//! use skyclock::toposlib::Observer;
//! use skyclock::sunlib::sun_position;
//!
//! let atlanta = Observer::new(33.7695, -84.3857);
//! let t = Instant::from_utc(chrono::Utc::now(), 0)?;
//! let sun = sun_position(&t, &atlanta);
//! println!("Sun {}", sun);
//! ```

pub mod almanac;
pub mod config;
pub mod constants;
pub mod data;
pub mod elementslib;
pub mod framelib;
pub mod keplerlib;
pub mod lighting;
pub mod moonlib;
pub mod planetlib;
pub mod satellitelib;
pub mod skylib;
pub mod sunlib;
pub mod time;
pub mod toposlib;
pub mod units;

use thiserror::Error;

/// Error type shared by every skyclock module
#[derive(Error, Debug)]
pub enum SkyclockError {
    /// The horizontal transform hit cos(altitude)·cos(latitude) ≈ 0
    #[error("Singular geometry: {0}")]
    SingularGeometry(String),

    /// Malformed or out-of-range input data
    #[error("Data error: {0}")]
    DataError(String),

    /// The satellite feed could not be reached or answered with an error
    #[error("Satellite feed error: {0}")]
    FeedError(String),

    /// A configuration value could not be parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result alias for skyclock operations
pub type Result<T> = std::result::Result<T, SkyclockError>;
