//! Mean orbital elements for the planets
//!
//! One immutable record per planet, plus Earth's own orbit, which the
//! geocentric conversion uses as its frame origin. Angles are radians and
//! the mean anomaly advances linearly with the day count:
//!
//! ```text
//! M(n) = M0 + rate·n
//! ```
//!
//! # Example
//!
//! ```ignore
//! use skyclock::elementslib::MARS;
//!
//! let m = MARS.mean_anomaly_at(8766.0);
//! ```

/// Keplerian elements of one orbit at the reference epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Mean anomaly at day count 0 (radians)
    pub mean_anomaly_at_epoch: f64,
    /// Mean motion (radians per day)
    pub mean_motion_per_day: f64,
    /// Eccentricity (dimensionless)
    pub eccentricity: f64,
    /// Longitude of the ascending node Ω (radians)
    pub longitude_of_ascending_node: f64,
    /// Argument of perihelion ω (radians)
    pub argument_of_perihelion: f64,
    /// Inclination to the ecliptic (radians)
    pub inclination: f64,
    /// Semi-major axis (AU)
    pub semi_major_axis_au: f64,
}

impl OrbitalElements {
    /// Mean anomaly `n` days after the reference epoch, not reduced mod 2π
    pub fn mean_anomaly_at(&self, n: f64) -> f64 {
        self.mean_anomaly_at_epoch + self.mean_motion_per_day * n
    }

    /// Semi-latus rectum p = a(1 − e²), AU
    pub fn semi_latus_rectum_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Orbital period in days, from the mean motion
    pub fn period_days(&self) -> f64 {
        std::f64::consts::TAU / self.mean_motion_per_day
    }
}

pub const MERCURY: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 3.050748266,
    mean_motion_per_day: 0.07142440569,
    eccentricity: 0.20563,
    longitude_of_ascending_node: 0.843535081,
    argument_of_perihelion: 0.508327145,
    inclination: 0.12226031,
    semi_major_axis_au: 0.38710,
};

pub const VENUS: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 0.879925196,
    mean_motion_per_day: 0.02796254827,
    eccentricity: 0.00677,
    longitude_of_ascending_node: 1.3383185,
    argument_of_perihelion: 0.957906507,
    inclination: 0.059253928,
    semi_major_axis_au: 0.72333,
};

pub const MARS: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 0.338122636,
    mean_motion_per_day: 0.00914620596,
    eccentricity: 0.09340,
    longitude_of_ascending_node: 0.864950271,
    argument_of_perihelion: 5.000403214,
    inclination: 0.03228859,
    semi_major_axis_au: 1.52368,
};

pub const JUPITER: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 0.34941492,
    mean_motion_per_day: 0.00144960066,
    eccentricity: 0.04849,
    longitude_of_ascending_node: 1.75342758,
    argument_of_perihelion: 4.7798808625,
    inclination: 0.02274164,
    semi_major_axis_au: 5.20260,
};

pub const SATURN: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 5.533060248,
    mean_motion_per_day: 0.00058243382,
    eccentricity: 0.05551,
    longitude_of_ascending_node: 1.983845948,
    argument_of_perihelion: 5.923490402,
    inclination: 0.043441245,
    semi_major_axis_au: 9.55491,
};

pub const URANUS: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 2.46178691,
    mean_motion_per_day: 0.0002041686,
    eccentricity: 0.04630,
    longitude_of_ascending_node: 1.29164837,
    argument_of_perihelion: 1.72785851,
    inclination: 0.013491395,
    semi_major_axis_au: 19.21845,
};

pub const NEPTUNE: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 4.471969876,
    mean_motion_per_day: 0.00010410889,
    eccentricity: 0.00899,
    longitude_of_ascending_node: 2.300064701,
    argument_of_perihelion: 4.82304285,
    inclination: 0.03089233,
    semi_major_axis_au: 30.11039,
};

pub const PLUTO: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 0.259739899,
    mean_motion_per_day: 0.0000691849,
    eccentricity: 0.2490,
    longitude_of_ascending_node: 1.925220338,
    argument_of_perihelion: 1.9856261834,
    inclination: 0.29914943,
    semi_major_axis_au: 39.543,
};

/// Earth's orbit, coplanar with the reference ecliptic (i = 0)
pub const EARTH: OrbitalElements = OrbitalElements {
    mean_anomaly_at_epoch: 6.240058221,
    mean_motion_per_day: 0.01720210473,
    eccentricity: 0.01671,
    longitude_of_ascending_node: 3.052109623,
    argument_of_perihelion: 5.027665256,
    inclination: 0.0,
    semi_major_axis_au: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [OrbitalElements; 9] = [
        MERCURY, VENUS, MARS, JUPITER, SATURN, URANUS, NEPTUNE, PLUTO, EARTH,
    ];

    #[test]
    fn test_mean_anomaly_is_linear() {
        assert_eq!(MARS.mean_anomaly_at(0.0), MARS.mean_anomaly_at_epoch);
        assert_relative_eq!(
            EARTH.mean_anomaly_at(100.0),
            6.240058221 + 1.720210473,
            epsilon = 1e-12
        );
        assert!(EARTH.mean_anomaly_at(-100.0) < EARTH.mean_anomaly_at_epoch);
    }

    #[test]
    fn test_periods_are_plausible() {
        assert_relative_eq!(EARTH.period_days(), 365.25, epsilon = 0.1);
        assert_relative_eq!(MERCURY.period_days(), 87.97, epsilon = 0.1);
        assert_relative_eq!(JUPITER.period_days(), 4334.0, epsilon = 5.0);
    }

    #[test]
    fn test_orbits_are_bound_ellipses() {
        for el in ALL.iter() {
            assert!(el.eccentricity >= 0.0 && el.eccentricity < 0.3);
            assert!(el.semi_major_axis_au > 0.0);
            assert!(el.semi_latus_rectum_au() <= el.semi_major_axis_au);
        }
        // Ordered outward from the Sun
        for pair in ALL[..8].windows(2) {
            assert!(pair[0].semi_major_axis_au < pair[1].semi_major_axis_au);
        }
    }
}
