//! Planetary positions from mean orbital elements

use nalgebra::Vector3;

use crate::elementslib::{self, OrbitalElements};
use crate::framelib::OBLIQUITY_J2000;
use crate::keplerlib::{heliocentric_position, to_geocentric_equatorial};
use crate::time::Instant;
use crate::toposlib::{HorizontalCoordinate, Observer};

/// The planets drawn in the sky, innermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    /// Get the planet's name
    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    /// Get the planet's mean orbital elements
    pub fn elements(&self) -> &'static OrbitalElements {
        match self {
            Planet::Mercury => &elementslib::MERCURY,
            Planet::Venus => &elementslib::VENUS,
            Planet::Mars => &elementslib::MARS,
            Planet::Jupiter => &elementslib::JUPITER,
            Planet::Saturn => &elementslib::SATURN,
            Planet::Uranus => &elementslib::URANUS,
            Planet::Neptune => &elementslib::NEPTUNE,
            Planet::Pluto => &elementslib::PLUTO,
        }
    }
}

impl std::fmt::Display for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A planet's place in the observer's sky
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetPosition {
    pub planet: Planet,
    pub horizontal: HorizontalCoordinate,
}

/// Horizontal position of one planet.
pub fn planet_position(planet: Planet, instant: &Instant, observer: &Observer) -> HorizontalCoordinate {
    let n = instant.day_count();
    let earth = heliocentric_position(&elementslib::EARTH, n);
    let lst = instant.local_sidereal_time(observer.longitude_degrees());
    position_from_earth(planet, n, &earth, observer, lst)
}

/// Horizontal positions of all eight planets, in [`Planet::ALL`] order.
///
/// Earth's heliocentric position and the sidereal time are computed once
/// and shared.
pub fn planet_positions(instant: &Instant, observer: &Observer) -> [PlanetPosition; 8] {
    let n = instant.day_count();
    let earth = heliocentric_position(&elementslib::EARTH, n);
    let lst = instant.local_sidereal_time(observer.longitude_degrees());
    Planet::ALL.map(|planet| PlanetPosition {
        planet,
        horizontal: position_from_earth(planet, n, &earth, observer, lst),
    })
}

fn position_from_earth(
    planet: Planet,
    n: f64,
    earth: &Vector3<f64>,
    observer: &Observer,
    lst: f64,
) -> HorizontalCoordinate {
    let helio = heliocentric_position(planet.elements(), n);
    let eq = to_geocentric_equatorial(&helio, earth, OBLIQUITY_J2000);
    observer.horizontal(&eq, lst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sunlib::sun_position;
    use chrono::{TimeZone, Utc};
    use std::f64::consts::PI;

    fn instant(y: i32, mo: u32, d: u32, h: u32) -> Instant {
        Instant::from_utc(Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap(), 0).unwrap()
    }

    fn separation(a: &HorizontalCoordinate, b: &HorizontalCoordinate) -> f64 {
        let va = a.to_scene(1.0);
        let vb = b.to_scene(1.0);
        va.angle(&vb)
    }

    #[test]
    fn test_names_and_order() {
        let names: Vec<&str> = Planet::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto"]
        );
        assert_eq!(Planet::Saturn.to_string(), "Saturn");
        assert_eq!(Planet::Mars.elements(), &elementslib::MARS);
    }

    #[test]
    fn test_batch_matches_single() {
        let t = instant(2024, 8, 1, 3);
        let obs = Observer::new(33.7695, -84.3857);
        let all = planet_positions(&t, &obs);
        for (i, pos) in all.iter().enumerate() {
            assert_eq!(pos.planet, Planet::ALL[i]);
            assert_eq!(pos.horizontal, planet_position(pos.planet, &t, &obs));
        }
    }

    #[test]
    fn test_positions_in_range() {
        let obs = Observer::new(-33.9, 18.4);
        for year in [1995, 2010, 2024, 2040] {
            for pos in planet_positions(&instant(year, 5, 17, 21), &obs) {
                let h = pos.horizontal;
                assert!(h.altitude.abs() <= PI / 2.0);
                assert!((0.0..2.0 * PI).contains(&h.azimuth), "{} {}", pos.planet, h.azimuth);
            }
        }
    }

    #[test]
    fn test_mercury_never_far_from_sun_in_sky() {
        let obs = Observer::new(10.0, 0.0);
        for month in 1..=12 {
            let t = instant(2023, month, 15, 12);
            let sun = sun_position(&t, &obs);
            let mercury = planet_position(Planet::Mercury, &t, &obs);
            assert!(separation(&sun, &mercury) < 29.0_f64.to_radians());
        }
    }
}
