//! Twilight states derived from the Sun's altitude
//!
//! The sky is split into three bands by the Sun's altitude, with a
//! symmetric ±18° (0.314159 rad) twilight band around the horizon. Street
//! lamps follow civil twilight instead: they come on once the Sun is 6°
//! below the horizon.

use std::fmt;

/// Sun altitude (radians) below which it is night
pub const NIGHT_BELOW: f64 = -0.314159;

/// Sun altitude (radians) above which it is day
pub const DAY_ABOVE: f64 = 0.314159;

/// Sun altitude (radians) at or below which street lamps are lit
pub const LAMPS_LIT_AT_OR_BELOW: f64 = -0.10472;

/// Human-readable band names indexed by [`TwilightBand::index`]
pub const TWILIGHT_NAMES: &[&str] = &["Night", "Twilight", "Day"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwilightBand {
    Night,
    Twilight,
    Day,
}

impl TwilightBand {
    /// Classify a Sun altitude in radians.
    ///
    /// Both boundaries belong to the twilight band.
    pub fn from_sun_altitude(altitude: f64) -> Self {
        if altitude < NIGHT_BELOW {
            TwilightBand::Night
        } else if altitude > DAY_ABOVE {
            TwilightBand::Day
        } else {
            TwilightBand::Twilight
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TwilightBand::Night => 0,
            TwilightBand::Twilight => 1,
            TwilightBand::Day => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        TWILIGHT_NAMES[self.index()]
    }

    /// CSS colour of the HUD text in this band
    pub fn hud_color(&self) -> &'static str {
        match self {
            TwilightBand::Night => "cornflowerblue",
            TwilightBand::Twilight => "coral",
            TwilightBand::Day => "#5de356",
        }
    }
}

impl fmt::Display for TwilightBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether street lamps are on for a Sun altitude in radians
pub fn lamps_lit(sun_altitude: f64) -> bool {
    sun_altitude <= LAMPS_LIT_AT_OR_BELOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(TwilightBand::from_sun_altitude(-1.0), TwilightBand::Night);
        assert_eq!(TwilightBand::from_sun_altitude(-0.2), TwilightBand::Twilight);
        assert_eq!(TwilightBand::from_sun_altitude(0.0), TwilightBand::Twilight);
        assert_eq!(TwilightBand::from_sun_altitude(0.5), TwilightBand::Day);
    }

    #[test]
    fn test_band_boundaries_are_twilight() {
        assert_eq!(TwilightBand::from_sun_altitude(NIGHT_BELOW), TwilightBand::Twilight);
        assert_eq!(TwilightBand::from_sun_altitude(DAY_ABOVE), TwilightBand::Twilight);
    }

    #[test]
    fn test_hud_colors_and_names() {
        assert_eq!(TwilightBand::Night.hud_color(), "cornflowerblue");
        assert_eq!(TwilightBand::Twilight.hud_color(), "coral");
        assert_eq!(TwilightBand::Day.hud_color(), "#5de356");
        assert_eq!(TwilightBand::Day.to_string(), "Day");
        assert_eq!(TwilightBand::Night.name(), TWILIGHT_NAMES[0]);
    }

    #[test]
    fn test_lamps_follow_civil_twilight() {
        assert!(!lamps_lit(0.0));
        assert!(!lamps_lit(-0.1));
        assert!(lamps_lit(LAMPS_LIT_AT_OR_BELOW));
        assert!(lamps_lit(-0.5));
    }
}
