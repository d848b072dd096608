//! Ecliptic and equatorial reference frames
//!
//! Bodies are first located in ecliptic coordinates (the plane of Earth's
//! orbit), then tilted by the obliquity ε into equatorial right ascension
//! and declination:
//!
//! ```text
//! RA  = atan2(sin γ·cos ε − tan β·sin ε, cos γ)
//! dec = asin(sin β·cos ε + cos β·sin ε·sin γ)
//! ```

use nalgebra::Vector3;

pub use crate::constants::OBLIQUITY_J2000;

/// Geocentric ecliptic longitude γ and latitude β, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl EclipticCoordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        EclipticCoordinate {
            longitude,
            latitude,
        }
    }

    /// Spherical direction of a Cartesian ecliptic vector.
    ///
    /// A zero vector has no direction; it maps to (0, 0).
    pub fn from_cartesian(v: &Vector3<f64>) -> Self {
        let distance = v.norm();
        if distance == 0.0 {
            return EclipticCoordinate::new(0.0, 0.0);
        }
        let longitude = v.y.atan2(v.x);
        let latitude = (v.z / distance).clamp(-1.0, 1.0).asin();
        EclipticCoordinate::new(longitude, latitude)
    }
}

/// Right ascension and declination, radians.
///
/// Right ascension comes straight out of `atan2`, so it lies in (−π, π];
/// the horizontal transform only ever uses it through sin/cos of the hour angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoordinate {
    pub right_ascension: f64,
    pub declination: f64,
}

impl EquatorialCoordinate {
    pub fn new(right_ascension: f64, declination: f64) -> Self {
        EquatorialCoordinate {
            right_ascension,
            declination,
        }
    }
}

/// Rotate ecliptic coordinates into the equatorial frame for obliquity ε.
pub fn ecliptic_to_equatorial(ecliptic: &EclipticCoordinate, obliquity: f64) -> EquatorialCoordinate {
    let (sin_l, cos_l) = ecliptic.longitude.sin_cos();
    let (sin_b, cos_b) = ecliptic.latitude.sin_cos();
    let (sin_e, cos_e) = obliquity.sin_cos();

    let ra = (sin_l * cos_e - ecliptic.latitude.tan() * sin_e).atan2(cos_l);
    let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).clamp(-1.0, 1.0).asin();
    EquatorialCoordinate::new(ra, dec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_vernal_equinox_maps_to_origin() {
        let eq = ecliptic_to_equatorial(&EclipticCoordinate::new(0.0, 0.0), OBLIQUITY_J2000);
        assert_relative_eq!(eq.right_ascension, 0.0, epsilon = 1e-15);
        assert_relative_eq!(eq.declination, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_summer_solstice_declination_is_obliquity() {
        let eq = ecliptic_to_equatorial(&EclipticCoordinate::new(FRAC_PI_2, 0.0), OBLIQUITY_J2000);
        assert_relative_eq!(eq.right_ascension, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(eq.declination, OBLIQUITY_J2000, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_obliquity_is_identity() {
        let ecl = EclipticCoordinate::new(2.0, 0.3);
        let eq = ecliptic_to_equatorial(&ecl, 0.0);
        assert_relative_eq!(eq.right_ascension, 2.0, epsilon = 1e-12);
        assert_relative_eq!(eq.declination, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_pole_declination() {
        // The north ecliptic pole sits at dec = 90° − ε
        let eq = ecliptic_to_equatorial(
            &EclipticCoordinate::new(PI / 2.0, FRAC_PI_2 - 1e-9),
            OBLIQUITY_J2000,
        );
        assert_relative_eq!(eq.declination, FRAC_PI_2 - OBLIQUITY_J2000, epsilon = 1e-6);
    }

    #[test]
    fn test_from_cartesian() {
        let ecl = EclipticCoordinate::from_cartesian(&Vector3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(ecl.longitude, FRAC_PI_2);
        assert_relative_eq!(ecl.latitude, 0.0);

        let up = EclipticCoordinate::from_cartesian(&Vector3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(up.latitude, PI / 4.0, epsilon = 1e-12);

        let none = EclipticCoordinate::from_cartesian(&Vector3::zeros());
        assert_eq!(none, EclipticCoordinate::new(0.0, 0.0));
    }
}
