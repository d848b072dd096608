//! Observers on Earth and their local horizon
//!
//! An [`Observer`] is a latitude/longitude pair (no elevation). The
//! horizontal transform turns equatorial coordinates into altitude above
//! the horizon and azimuth measured from north through east:
//!
//! ```text
//! H  = RA − LST
//! a  = asin(sin δ·sin φ + cos δ·cos φ·cos H)
//! A0 = acos((sin δ − sin a·sin φ) / (cos a·cos φ))
//! A  = A0        if sin H > 0
//!      2π − A0   otherwise
//! ```
//!
//! `acos` alone only covers half a turn; the sign of sin H picks the half.
//!
//! # Example
//!
//! ```ignore
//! use skyclock::toposlib::Observer;
//!
//! let atlanta = Observer::new(33.7695, -84.3857);
//! let lst = instant.local_sidereal_time(atlanta.longitude_degrees());
//! let horizon = atlanta.horizontal(&equatorial, lst);
//! ```

use nalgebra::Vector3;
use std::f64::consts::TAU;

use crate::constants::{MAX_LATITUDE_DEG, SINGULAR_EPSILON};
use crate::framelib::EquatorialCoordinate;
use crate::units::{display_degrees, wrap_tau};
use crate::{Result, SkyclockError};

/// A geographic observer position.
///
/// Latitude is clamped to ±89.999999° on construction so the horizontal
/// transform never divides by cos(±90°). Longitude is kept as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude_degrees: f64,
    longitude_degrees: f64,
}

impl Observer {
    /// Create an observer; latitude is clamped, longitude is not normalised.
    pub fn new(latitude_degrees: f64, longitude_degrees: f64) -> Self {
        Observer {
            latitude_degrees: latitude_degrees.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG),
            longitude_degrees,
        }
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude_degrees
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude_degrees
    }

    pub fn latitude_radians(&self) -> f64 {
        self.latitude_degrees.to_radians()
    }

    pub fn longitude_radians(&self) -> f64 {
        self.longitude_degrees.to_radians()
    }

    /// Horizontal coordinates of `equatorial` seen from here at sidereal time `lst`.
    pub fn horizontal(&self, equatorial: &EquatorialCoordinate, lst: f64) -> HorizontalCoordinate {
        to_horizontal(
            equatorial.right_ascension,
            equatorial.declination,
            self.latitude_radians(),
            lst,
        )
    }
}

impl std::fmt::Display for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GCS [{}, {}]", self.latitude_degrees, self.longitude_degrees)
    }
}

/// Altitude/azimuth of a body as seen by an observer, radians.
///
/// Altitude lies in [−π/2, π/2] (0 = horizon). Azimuth lies in [0, 2π),
/// measured from north through east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoordinate {
    pub altitude: f64,
    pub azimuth: f64,
}

impl HorizontalCoordinate {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        HorizontalCoordinate { altitude, azimuth }
    }

    /// The placeholder used before any real position is known.
    pub const HORIZON_NORTH: HorizontalCoordinate = HorizontalCoordinate {
        altitude: 0.0,
        azimuth: 0.0,
    };

    /// Whether the body is above the horizon
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Scene-space position at `distance` from the observer.
    ///
    /// Y is up, the north horizon point is −Z and east is +X.
    pub fn to_scene(&self, distance: f64) -> Vector3<f64> {
        let (sin_alt, cos_alt) = self.altitude.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        Vector3::new(
            sin_az * cos_alt * distance,
            sin_alt * distance,
            -cos_az * cos_alt * distance,
        )
    }

    /// (altitude, azimuth) in degrees rounded to two decimals
    pub fn display_degrees(&self) -> (f64, f64) {
        (display_degrees(self.altitude), display_degrees(self.azimuth))
    }
}

impl std::fmt::Display for HorizontalCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (alt, az) = self.display_degrees();
        write!(f, "Alt/Az [{}, {}]", alt, az)
    }
}

/// Convert equatorial coordinates to the observer's horizon.
///
/// Never fails. Where cos(altitude)·cos(latitude) vanishes (body at the
/// zenith or nadir) azimuth is undefined and reported as 0; elsewhere the
/// acos argument is clamped against rounding just outside [−1, 1].
/// Use [`try_to_horizontal`] to detect that case instead.
///
/// # Arguments
/// * `right_ascension` - radians
/// * `declination` - radians
/// * `latitude` - observer latitude, radians
/// * `lst` - local sidereal time, radians
pub fn to_horizontal(right_ascension: f64, declination: f64, latitude: f64, lst: f64) -> HorizontalCoordinate {
    let (coord, _) = horizontal_parts(right_ascension, declination, latitude, lst);
    coord
}

/// Like [`to_horizontal`], but reports singular geometry as an error.
pub fn try_to_horizontal(
    right_ascension: f64,
    declination: f64,
    latitude: f64,
    lst: f64,
) -> Result<HorizontalCoordinate> {
    match horizontal_parts(right_ascension, declination, latitude, lst) {
        (coord, false) => Ok(coord),
        (coord, true) => Err(SkyclockError::SingularGeometry(format!(
            "azimuth undefined at altitude {:.9} rad, latitude {:.9} rad",
            coord.altitude, latitude
        ))),
    }
}

/// Shared body of the transform; the flag is set when the azimuth is degenerate.
fn horizontal_parts(
    right_ascension: f64,
    declination: f64,
    latitude: f64,
    lst: f64,
) -> (HorizontalCoordinate, bool) {
    let hour_angle = right_ascension - lst;
    let (sin_dec, cos_dec) = declination.sin_cos();
    let (sin_lat, cos_lat) = latitude.sin_cos();

    let altitude = (sin_dec * sin_lat + cos_dec * cos_lat * hour_angle.cos())
        .clamp(-1.0, 1.0)
        .asin();

    let denominator = altitude.cos() * cos_lat;
    if denominator.abs() < SINGULAR_EPSILON {
        return (HorizontalCoordinate::new(altitude, 0.0), true);
    }

    let a0 = ((sin_dec - altitude.sin() * sin_lat) / denominator)
        .clamp(-1.0, 1.0)
        .acos();
    let azimuth = if hour_angle.sin() > 0.0 { a0 } else { TAU - a0 };

    (HorizontalCoordinate::new(altitude, wrap_tau(azimuth)), false)
}
