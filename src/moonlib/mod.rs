//! Apparent position and phase of the Moon
//!
//! Short direct series in the day count n:
//!
//! ```text
//! L = 3.81033301 + 0.229971493746·n     mean longitude
//! M = 2.355548718 + 0.228027144599·n    mean anomaly
//! F = 1.6279035 + 0.2308957154·n        argument of latitude
//! γ = L + 0.10976376·sin M
//! β = 0.089500484·sin F
//! ```
//!
//! Right ascension is taken as `atan2(cos ε·sin γ, cos γ)`, leaving out the
//! `tan β·sin ε` term; declination keeps β.
//!
//! The phase is a one-minus-dot-product proxy on the scene placement
//! vectors, not a phase-angle law.

use nalgebra::Vector3;

use crate::framelib::{EclipticCoordinate, EquatorialCoordinate, OBLIQUITY_J2000};
use crate::time::Instant;
use crate::toposlib::{HorizontalCoordinate, Observer};

const MEAN_LONGITUDE_AT_EPOCH: f64 = 3.810_333_01;
const MEAN_LONGITUDE_RATE: f64 = 0.229_971_493_746;
const MEAN_ANOMALY_AT_EPOCH: f64 = 2.355_548_718;
const MEAN_ANOMALY_RATE: f64 = 0.228_027_144_599;
const LATITUDE_ARGUMENT_AT_EPOCH: f64 = 1.627_903_5;
const LATITUDE_ARGUMENT_RATE: f64 = 0.230_895_715_4;
const CENTER: f64 = 0.109_763_76;
const LATITUDE_AMPLITUDE: f64 = 0.089_500_484;

/// The Sun's placement vector is pushed this far out before differencing
/// against the Moon's, so the Moon sees it as effectively at infinity.
pub const SUN_DIRECTION_SCALE: f64 = 1000.0;

/// Added to the phase proxy so a new Moon is still faintly visible
pub const ILLUMINATION_FLOOR: f64 = 0.2;

/// Series quantities for one day count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarCoordinates {
    pub mean_longitude: f64,
    pub mean_anomaly: f64,
    pub latitude_argument: f64,
    pub ecliptic: EclipticCoordinate,
}

impl LunarCoordinates {
    pub fn at_day(n: f64) -> Self {
        let mean_longitude = MEAN_LONGITUDE_AT_EPOCH + MEAN_LONGITUDE_RATE * n;
        let mean_anomaly = MEAN_ANOMALY_AT_EPOCH + MEAN_ANOMALY_RATE * n;
        let latitude_argument = LATITUDE_ARGUMENT_AT_EPOCH + LATITUDE_ARGUMENT_RATE * n;
        let ecliptic = EclipticCoordinate::new(
            mean_longitude + CENTER * mean_anomaly.sin(),
            LATITUDE_AMPLITUDE * latitude_argument.sin(),
        );
        LunarCoordinates {
            mean_longitude,
            mean_anomaly,
            latitude_argument,
            ecliptic,
        }
    }

    /// Right ascension (without the β term) and declination for the fixed obliquity
    pub fn equatorial(&self) -> EquatorialCoordinate {
        let (sin_l, cos_l) = self.ecliptic.longitude.sin_cos();
        let (sin_b, cos_b) = self.ecliptic.latitude.sin_cos();
        let (sin_e, cos_e) = OBLIQUITY_J2000.sin_cos();

        let ra = (cos_e * sin_l).atan2(cos_l);
        let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).clamp(-1.0, 1.0).asin();
        EquatorialCoordinate::new(ra, dec)
    }
}

/// Altitude/azimuth of the Moon for `observer` at `instant`.
pub fn moon_position(instant: &Instant, observer: &Observer) -> HorizontalCoordinate {
    let eq = LunarCoordinates::at_day(instant.day_count()).equatorial();
    observer.horizontal(&eq, instant.local_sidereal_time(observer.longitude_degrees()))
}

/// Phase proxy from scene placement vectors, in [0.2, 2.2].
///
/// `max(1 − dot(n̂(1000·sun − moon), n̂(moon)), 0) + 0.2`. Full Moon (Sun
/// behind the observer) gives the maximum. A zero-length vector contributes
/// a zero dot product.
pub fn moon_illumination(sun_scene: &Vector3<f64>, moon_scene: &Vector3<f64>) -> f64 {
    let towards_sun = sun_scene * SUN_DIRECTION_SCALE - moon_scene;
    let dot = match (towards_sun.try_normalize(0.0), moon_scene.try_normalize(0.0)) {
        (Some(a), Some(b)) => a.dot(&b),
        _ => 0.0,
    };
    (1.0 - dot).max(0.0) + ILLUMINATION_FLOOR
}

/// Moonlight intensity: only while the Sun is down, scaled by phase.
///
/// `max(sin(−sun_alt), 0)·(max(sin moon_alt, 0) + 0.8)·illumination`
pub fn moon_light_intensity(sun_altitude: f64, moon_altitude: f64, illumination: f64) -> f64 {
    (-sun_altitude).sin().max(0.0) * (moon_altitude.sin().max(0.0) + 0.8) * illumination
}
