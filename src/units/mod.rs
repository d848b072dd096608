//! Angle and length helpers built on the `uom` crate
//!
//! The engine works in bare `f64` radians internally; `uom` quantities are
//! used at the edges where a value changes unit (HUD degrees, satellite
//! altitudes in kilometres).

use std::f64::consts::{PI, TAU};

pub use uom::si::angle::{degree, radian};
pub use uom::si::f64::{Angle, Length};
pub use uom::si::length::kilometer;

/// Fold an angle in degrees into [0, 360).
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0; that
/// case is folded back to zero.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Fold an angle in radians into [0, 2π).
pub fn wrap_tau(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert radians to degrees rounded to two decimals, as shown on the HUD.
///
/// Halves round toward +∞, so -28.645° shows as -28.64.
pub fn display_degrees(radians: f64) -> f64 {
    (radians / PI * 18000.0 + 0.5).floor() / 100.0
}

/// Convert degrees to radians through `uom`.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    Angle::new::<degree>(degrees).get::<radian>()
}

/// Express a length given in kilometres as a `uom` quantity.
pub fn km(value: f64) -> Length {
    Length::new::<kilometer>(value)
}
