//! Tracking an Earth satellite from externally supplied fixes
//!
//! A [`SatelliteFix`] is the sub-satellite point and altitude reported by a
//! feed. [`track_position`] turns one fix into altitude/azimuth for an
//! observer using spherical-Earth geometry:
//!
//! ```text
//! γ   = acos(sin φ·sin φs + cos φ·cos φs·cos(λ − λs))      ground-track separation
//! d   = sqrt(1 + (r/R)² − 2·(r/R)·cos γ)                   range in units of R = r + h
//! alt = acos(sin γ / d) · (−1 if d > 0.34 else +1)
//! az  = atan2(sin(λs − λ)·cos φs, cos φ·sin φs − sin φ·cos φs·cos(λs − λ))
//! ```
//!
//! The altitude sign is a heuristic: ranges beyond 0.34·R are taken to be
//! below the horizon, which misplaces some low passes.
//!
//! Fixes arrive asynchronously; see [`poller`] for the single-slot cell the
//! renderer reads and the background polling that fills it.

pub mod poller;

pub use poller::{FixPoller, FixSource, LatestFix, StampedFix};

use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_KM;
use crate::toposlib::{HorizontalCoordinate, Observer};
use crate::units::{degrees_to_radians, kilometer, km, wrap_tau};

/// Range ratio beyond which the satellite is placed below the horizon
pub const BELOW_HORIZON_RANGE_RATIO: f64 = 0.34;

/// One reported satellite position.
///
/// Field names on the wire are `latitude`, `longitude` (degrees) and
/// `altitude` (km); other fields in the payload are ignored. Units are
/// trusted as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatelliteFix {
    #[serde(rename = "latitude")]
    pub latitude_degrees: f64,
    #[serde(rename = "longitude")]
    pub longitude_degrees: f64,
    #[serde(rename = "altitude")]
    pub altitude_km: f64,
}

impl SatelliteFix {
    pub fn new(latitude_degrees: f64, longitude_degrees: f64, altitude_km: f64) -> Self {
        SatelliteFix {
            latitude_degrees,
            longitude_degrees,
            altitude_km,
        }
    }

    /// Distance from Earth's centre, km
    pub fn orbit_radius_km(&self) -> f64 {
        (km(EARTH_RADIUS_KM) + km(self.altitude_km)).get::<kilometer>()
    }
}

/// Great-circle separation between observer and sub-satellite point, and
/// the straight-line range in units of the orbit radius.
fn look_geometry(observer: &Observer, fix: &SatelliteFix) -> (f64, f64) {
    let lat = observer.latitude_radians();
    let lon = observer.longitude_radians();
    let sat_lat = degrees_to_radians(fix.latitude_degrees);
    let sat_lon = degrees_to_radians(fix.longitude_degrees);

    let separation = (lat.sin() * sat_lat.sin() + lat.cos() * sat_lat.cos() * (lon - sat_lon).cos())
        .clamp(-1.0, 1.0)
        .acos();

    let ratio = EARTH_RADIUS_KM / fix.orbit_radius_km();
    let range = (1.0 + ratio * ratio - 2.0 * ratio * separation.cos()).max(0.0).sqrt();
    (separation, range)
}

/// Observer-to-satellite distance as a fraction of the orbit radius.
///
/// Directly overhead this is `|1 − R/(R + h)|`.
pub fn range_ratio(observer: &Observer, fix: &SatelliteFix) -> f64 {
    look_geometry(observer, fix).1
}

/// Altitude/azimuth of the satellite described by `fix`, seen by `observer`.
///
/// Directly overhead (zero separation) the altitude is +π/2 and the azimuth 0.
pub fn track_position(observer: &Observer, fix: &SatelliteFix) -> HorizontalCoordinate {
    let (separation, range) = look_geometry(observer, fix);

    let altitude = if range == 0.0 {
        std::f64::consts::FRAC_PI_2
    } else {
        let sign = if range > BELOW_HORIZON_RANGE_RATIO { -1.0 } else { 1.0 };
        (separation.sin() / range).clamp(-1.0, 1.0).acos() * sign
    };

    let lat = observer.latitude_radians();
    let lon = observer.longitude_radians();
    let sat_lat = degrees_to_radians(fix.latitude_degrees);
    let sat_lon = degrees_to_radians(fix.longitude_degrees);
    let azimuth = ((sat_lon - lon).sin() * sat_lat.cos())
        .atan2(lat.cos() * sat_lat.sin() - lat.sin() * sat_lat.cos() * (sat_lon - lon).cos());

    HorizontalCoordinate::new(altitude, wrap_tau(azimuth))
}
