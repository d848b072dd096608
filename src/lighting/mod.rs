//! Light colours and intensities derived from body altitudes
//!
//! Everything here except [`Lamp`] is a pure function of the Sun and Moon
//! positions for a frame. The lamp flickers, so it keeps a little state and
//! draws from a caller-supplied random number generator.

use nalgebra::Vector3;
use rand::Rng;

use crate::almanac::lamps_lit;
use crate::moonlib::{moon_illumination, moon_light_intensity};
use crate::sunlib::{sun_light_intensity, sun_redness, MAX_SUN_INTENSITY};
use crate::toposlib::HorizontalCoordinate;

/// Minimum milliseconds between lamp colour changes
pub const LAMP_FLICKER_MS: i64 = 100;

/// A linear RGB triple; components are not clamped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb { r, g, b }
    }
}

/// Sun disc and sunlight appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunLighting {
    pub redness: f64,
    pub intensity: f64,
    /// Colour of the Sun's disc
    pub disc_color: Rgb,
    /// Colour of the light the Sun casts
    pub light_color: Rgb,
}

impl SunLighting {
    pub fn from_altitude(altitude: f64) -> Self {
        let redness = sun_redness(altitude);
        SunLighting {
            redness,
            intensity: sun_light_intensity(altitude),
            disc_color: Rgb::new(redness + 0.3, 0.7 - redness / 2.0, 0.5 - redness / 2.0),
            light_color: Rgb::new(redness, 0.5 - redness / 2.0, 0.33 - redness / 2.0),
        }
    }
}

/// Moon phase, moonlight and disc colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonLighting {
    pub illumination: f64,
    pub intensity: f64,
    pub color: Rgb,
}

impl MoonLighting {
    /// # Arguments
    /// * `sun`, `moon` - horizontal positions for the frame
    /// * `sun_scene`, `moon_scene` - their placement vectors
    /// * `sun_intensity` - the Sun's light intensity, which bleaches the disc by day
    pub fn compute(
        sun: &HorizontalCoordinate,
        moon: &HorizontalCoordinate,
        sun_scene: &Vector3<f64>,
        moon_scene: &Vector3<f64>,
        sun_intensity: f64,
    ) -> Self {
        let illumination = moon_illumination(sun_scene, moon_scene);
        let k = sun_intensity / MAX_SUN_INTENSITY;
        MoonLighting {
            illumination,
            intensity: moon_light_intensity(sun.altitude, moon.altitude, illumination),
            color: Rgb::new(0.4 + 0.5 * k, 0.5 + 0.4 * k, 0.8 + 0.1 * k),
        }
    }
}

/// Overhead fill light: blue and dim at night, warm by day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub intensity: f64,
    pub color: Rgb,
}

impl AmbientLight {
    pub fn from_sun_altitude(sun_altitude: f64) -> Self {
        let i = sun_altitude.sin().max(0.0) * 0.4 - 0.2;
        AmbientLight {
            intensity: i + 0.5,
            color: Rgb::new(0.5 + i, 0.5, 0.5 - i),
        }
    }
}

/// A street lamp that flickers while lit.
#[derive(Debug, Clone, PartialEq)]
pub struct Lamp {
    color: Rgb,
    next_flicker_ms: i64,
}

impl Default for Lamp {
    fn default() -> Self {
        Lamp {
            color: Rgb::BLACK,
            next_flicker_ms: i64::MIN,
        }
    }
}

impl Lamp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_lit(&self) -> bool {
        self.color != Rgb::BLACK
    }

    /// Update for the Sun's altitude at simulated time `now_ms`.
    ///
    /// Above civil twilight the lamp is black. Otherwise it takes a new
    /// orange shade `(0.8 + 0.2u, 0.4, 0)` at most every 100 ms and keeps
    /// the previous one in between.
    pub fn update<R: Rng>(&mut self, sun_altitude: f64, now_ms: i64, rng: &mut R) -> Rgb {
        if !lamps_lit(sun_altitude) {
            self.color = Rgb::BLACK;
        } else if now_ms >= self.next_flicker_ms {
            self.next_flicker_ms = now_ms.saturating_add(LAMP_FLICKER_MS);
            let u: f64 = rng.gen();
            self.color = Rgb::new(0.8 + 0.2 * u, 0.4, 0.0);
        }
        self.color
    }
}

/// All frame lighting that depends only on positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    pub sun: SunLighting,
    pub moon: MoonLighting,
    pub ambient: AmbientLight,
    pub lamps_lit: bool,
}

impl SceneLighting {
    pub fn compute(
        sun: &HorizontalCoordinate,
        moon: &HorizontalCoordinate,
        sun_scene: &Vector3<f64>,
        moon_scene: &Vector3<f64>,
    ) -> Self {
        let sun_lighting = SunLighting::from_altitude(sun.altitude);
        SceneLighting {
            sun: sun_lighting,
            moon: MoonLighting::compute(sun, moon, sun_scene, moon_scene, sun_lighting.intensity),
            ambient: AmbientLight::from_sun_altitude(sun.altitude),
            lamps_lit: lamps_lit(sun.altitude),
        }
    }
}
