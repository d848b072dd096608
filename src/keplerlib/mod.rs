//! Closed-form Keplerian positions for the planets
//!
//! The true anomaly comes from a third-order series in the eccentricity
//! rather than an iterative solve of Kepler's equation:
//!
//! ```text
//! v = M + (2e − e³/4)·sin M + (5/4)·e²·sin 2M + (13/12)·e³·sin 3M
//! ```
//!
//! That is accurate to well under a degree for the planets here (e ≤ 0.25).
//! The orbit is then rotated into the heliocentric ecliptic frame and
//! differenced against Earth's own orbit to get a geocentric direction.
//!
//! # Example
//!
//! ```ignore
//! use skyclock::elementslib::{EARTH, JUPITER};
//! use skyclock::framelib::OBLIQUITY_J2000;
//! use skyclock::keplerlib::{heliocentric_position, to_geocentric_equatorial};
//!
//! let jupiter = heliocentric_position(&JUPITER, n);
//! let earth = heliocentric_position(&EARTH, n);
//! let eq = to_geocentric_equatorial(&jupiter, &earth, OBLIQUITY_J2000);
//! ```

use nalgebra::Vector3;

use crate::elementslib::OrbitalElements;
use crate::framelib::{ecliptic_to_equatorial, EclipticCoordinate, EquatorialCoordinate};

/// True anomaly from mean anomaly by the third-order series.
///
/// With `eccentricity == 0` every correction term vanishes and the mean
/// anomaly is returned unchanged.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let e = eccentricity;
    let e2 = e * e;
    let e3 = e2 * e;
    mean_anomaly
        + (2.0 * e - e3 / 4.0) * mean_anomaly.sin()
        + 5.0 / 4.0 * e2 * (2.0 * mean_anomaly).sin()
        + 13.0 / 12.0 * e3 * (3.0 * mean_anomaly).sin()
}

/// Heliocentric radius r = a(1 − e²)/(1 + e·cos v), AU
pub fn orbit_radius(elements: &OrbitalElements, true_anomaly: f64) -> f64 {
    elements.semi_latus_rectum_au() / (1.0 + elements.eccentricity * true_anomaly.cos())
}

/// Heliocentric ecliptic Cartesian position (AU) at true anomaly `v`.
///
/// Rotates the in-plane position by ω, i and Ω in turn.
pub fn heliocentric_cartesian(elements: &OrbitalElements, true_anomaly: f64) -> Vector3<f64> {
    let r = orbit_radius(elements, true_anomaly);
    let (sin_node, cos_node) = elements.longitude_of_ascending_node.sin_cos();
    let (sin_inc, cos_inc) = elements.inclination.sin_cos();
    let (sin_u, cos_u) = (elements.argument_of_perihelion + true_anomaly).sin_cos();

    Vector3::new(
        r * (cos_node * cos_u - sin_node * cos_inc * sin_u),
        r * (sin_node * cos_u + cos_node * cos_inc * sin_u),
        r * sin_inc * sin_u,
    )
}

/// Heliocentric position `n` days after the reference epoch
pub fn heliocentric_position(elements: &OrbitalElements, n: f64) -> Vector3<f64> {
    let v = solve_kepler(elements.mean_anomaly_at(n), elements.eccentricity);
    heliocentric_cartesian(elements, v)
}

/// Geocentric ecliptic longitude/latitude of a heliocentric position
pub fn geocentric_ecliptic(heliocentric: &Vector3<f64>, earth_heliocentric: &Vector3<f64>) -> EclipticCoordinate {
    EclipticCoordinate::from_cartesian(&(heliocentric - earth_heliocentric))
}

/// Geocentric right ascension and declination of a heliocentric position.
///
/// Subtracts Earth's heliocentric position and rotates the resulting
/// ecliptic direction by `obliquity`.
pub fn to_geocentric_equatorial(
    heliocentric: &Vector3<f64>,
    earth_heliocentric: &Vector3<f64>,
    obliquity: f64,
) -> EquatorialCoordinate {
    ecliptic_to_equatorial(&geocentric_ecliptic(heliocentric, earth_heliocentric), obliquity)
}
