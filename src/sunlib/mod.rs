//! Apparent position of the Sun
//!
//! A low-order direct series in the day count n gives the Sun's ecliptic
//! longitude without going through the Keplerian pipeline:
//!
//! ```text
//! L = 4.89495042 + 0.0172027923937·n        mean longitude
//! g = 6.240040768 + 0.0172019703436·n       mean anomaly
//! γ = L + 0.033423055·sin g + 0.0003490659·sin 2g
//! ε = 0.409087723 − 6.981317e-9·n
//! ```
//!
//! The ecliptic latitude is taken as zero. Unlike the planets, the obliquity
//! here drifts slowly with time.
//!
//! # Example
//!
//! ```ignore
//! use skyclock::sunlib::{sun_position, sun_light_intensity};
//!
//! let sun = sun_position(&instant, &observer);
//! let intensity = sun_light_intensity(sun.altitude);
//! ```

use crate::framelib::{ecliptic_to_equatorial, EclipticCoordinate, EquatorialCoordinate};
use crate::time::Instant;
use crate::toposlib::{HorizontalCoordinate, Observer};

const MEAN_LONGITUDE_AT_EPOCH: f64 = 4.894_950_42;
const MEAN_LONGITUDE_RATE: f64 = 0.017_202_792_393_7;
const MEAN_ANOMALY_AT_EPOCH: f64 = 6.240_040_768;
const MEAN_ANOMALY_RATE: f64 = 0.017_201_970_343_6;
const CENTER_1: f64 = 0.033_423_055;
const CENTER_2: f64 = 0.000_349_065_9;
const OBLIQUITY_AT_EPOCH: f64 = 0.409_087_723;
const OBLIQUITY_RATE: f64 = 6.981_317e-9;

/// Upper bound of [`sun_light_intensity`]
pub const MAX_SUN_INTENSITY: f64 = 5.0;

/// Intermediate quantities of the solar series for one day count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCoordinates {
    /// Mean longitude L (radians, unreduced)
    pub mean_longitude: f64,
    /// Mean anomaly g (radians, unreduced)
    pub mean_anomaly: f64,
    /// Ecliptic longitude γ after the equation of centre
    pub ecliptic_longitude: f64,
    /// Obliquity ε of date
    pub obliquity: f64,
}

impl SolarCoordinates {
    /// Evaluate the series at day count `n`.
    pub fn at_day(n: f64) -> Self {
        let mean_longitude = MEAN_LONGITUDE_AT_EPOCH + MEAN_LONGITUDE_RATE * n;
        let mean_anomaly = MEAN_ANOMALY_AT_EPOCH + MEAN_ANOMALY_RATE * n;
        let ecliptic_longitude =
            mean_longitude + CENTER_1 * mean_anomaly.sin() + CENTER_2 * (2.0 * mean_anomaly).sin();
        SolarCoordinates {
            mean_longitude,
            mean_anomaly,
            ecliptic_longitude,
            obliquity: OBLIQUITY_AT_EPOCH - OBLIQUITY_RATE * n,
        }
    }

    pub fn ecliptic(&self) -> EclipticCoordinate {
        EclipticCoordinate::new(self.ecliptic_longitude, 0.0)
    }

    /// Right ascension and declination, using the obliquity of date
    pub fn equatorial(&self) -> EquatorialCoordinate {
        ecliptic_to_equatorial(&self.ecliptic(), self.obliquity)
    }
}

/// Altitude/azimuth of the Sun for `observer` at `instant`.
pub fn sun_position(instant: &Instant, observer: &Observer) -> HorizontalCoordinate {
    let eq = SolarCoordinates::at_day(instant.day_count()).equatorial();
    observer.horizontal(&eq, instant.local_sidereal_time(observer.longitude_degrees()))
}

/// How red the Sun looks, in [0.4, 0.6]: reddest on the horizon.
///
/// `|cos alt|^30·0.2 + 0.4`
pub fn sun_redness(altitude: f64) -> f64 {
    altitude.cos().abs().powi(30) * 0.2 + 0.4
}

/// Directional light intensity from the Sun, in [0, 5].
///
/// `clamp(sin(alt + 0.08)·20, 0, 5)`: rises steeply just below the horizon
/// and saturates a few degrees above it.
pub fn sun_light_intensity(altitude: f64) -> f64 {
    ((altitude + 0.08).sin() * 20.0).clamp(0.0, MAX_SUN_INTENSITY)
}
