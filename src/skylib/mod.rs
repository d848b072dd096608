//! One frame's worth of sky
//!
//! [`SkySnapshot::compute`] evaluates every body, the derived lighting and
//! the twilight band for a single instant and observer. Nothing is cached
//! between frames; the only outside state is the satellite fix passed in.
//!
//! # Example
//!
//! ```ignore
//! use skyclock::skylib::{SkyBody, SkySnapshot};
//!
//! let snapshot = SkySnapshot::compute(&instant, &observer, latest.fix().as_ref(), &config.distances);
//! let sun_xyz = snapshot.scene_position(SkyBody::Sun);
//! for line in snapshot.hud_lines() {
//!     println!("{}", line);
//! }
//! ```

use std::fmt;

use log::trace;
use nalgebra::Vector3;

use crate::almanac::TwilightBand;
use crate::config::BodyDistances;
use crate::lighting::SceneLighting;
use crate::moonlib::moon_position;
use crate::planetlib::{planet_positions, Planet, PlanetPosition};
use crate::satellitelib::{track_position, SatelliteFix};
use crate::sunlib::sun_position;
use crate::time::Instant;
use crate::toposlib::{HorizontalCoordinate, Observer};

/// Anything placed in the sky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyBody {
    Sun,
    Moon,
    Planet(Planet),
    Satellite,
}

impl SkyBody {
    /// Every body in drawing order
    pub fn all() -> Vec<SkyBody> {
        let mut bodies = vec![SkyBody::Sun, SkyBody::Moon];
        bodies.extend(Planet::ALL.iter().map(|p| SkyBody::Planet(*p)));
        bodies.push(SkyBody::Satellite);
        bodies
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkyBody::Sun => "Sun",
            SkyBody::Moon => "Moon",
            SkyBody::Planet(p) => p.name(),
            SkyBody::Satellite => "ISS",
        }
    }

    /// Scene distance for this kind of body
    pub fn distance(&self, distances: &BodyDistances) -> f64 {
        match self {
            SkyBody::Sun => distances.sun,
            SkyBody::Moon => distances.moon,
            SkyBody::Planet(_) => distances.planets,
            SkyBody::Satellite => distances.satellite,
        }
    }
}

impl fmt::Display for SkyBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Positions and lighting for one instant and observer
#[derive(Debug, Clone, PartialEq)]
pub struct SkySnapshot {
    pub instant: Instant,
    pub observer: Observer,
    pub sun: HorizontalCoordinate,
    pub moon: HorizontalCoordinate,
    pub planets: [PlanetPosition; 8],
    /// Horizon north until a fix is available
    pub satellite: HorizontalCoordinate,
    pub has_satellite_fix: bool,
    pub lighting: SceneLighting,
    pub twilight: TwilightBand,
    pub distances: BodyDistances,
}

impl SkySnapshot {
    pub fn compute(
        instant: &Instant,
        observer: &Observer,
        fix: Option<&SatelliteFix>,
        distances: &BodyDistances,
    ) -> Self {
        let sun = sun_position(instant, observer);
        let moon = moon_position(instant, observer);
        let planets = planet_positions(instant, observer);
        let satellite = fix
            .map(|f| track_position(observer, f))
            .unwrap_or(HorizontalCoordinate::HORIZON_NORTH);

        let lighting = SceneLighting::compute(
            &sun,
            &moon,
            &sun.to_scene(distances.sun),
            &moon.to_scene(distances.moon),
        );
        let twilight = TwilightBand::from_sun_altitude(sun.altitude);

        trace!(
            "sky at {} for {}: sun {}, moon {}, {}",
            instant,
            observer,
            sun,
            moon,
            twilight
        );

        SkySnapshot {
            instant: *instant,
            observer: *observer,
            sun,
            moon,
            planets,
            satellite,
            has_satellite_fix: fix.is_some(),
            lighting,
            twilight,
            distances: *distances,
        }
    }

    pub fn position(&self, body: SkyBody) -> HorizontalCoordinate {
        match body {
            SkyBody::Sun => self.sun,
            SkyBody::Moon => self.moon,
            SkyBody::Planet(planet) => self.planet(planet),
            SkyBody::Satellite => self.satellite,
        }
    }

    fn planet(&self, planet: Planet) -> HorizontalCoordinate {
        self.planets
            .iter()
            .find(|p| p.planet == planet)
            .map(|p| p.horizontal)
            .unwrap_or(HorizontalCoordinate::HORIZON_NORTH)
    }

    /// Placement vector of `body` at its configured distance
    pub fn scene_position(&self, body: SkyBody) -> Vector3<f64> {
        self.position(body).to_scene(body.distance(&self.distances))
    }

    /// Text for a heads-up display: time, location, then one line per body
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![self.instant.to_string(), self.observer.to_string()];
        for body in SkyBody::all() {
            lines.push(format!("{} {}", body, self.position(body)));
        }
        lines
    }
}
