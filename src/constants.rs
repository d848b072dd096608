//! Numeric constants shared across the engine
//!
//! Angles are radians unless the name says otherwise.

/// Reference instant 2000-01-01T12:00:00 UTC in milliseconds since the Unix epoch
pub const J2000_UNIX_MS: i64 = 946_728_000_000;

/// Milliseconds in one day
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Local sidereal time at the reference epoch, degrees (before the hour term)
pub const LST_BASE_DEG: f64 = 100.46;

/// Sidereal advance per day of the day count, degrees
pub const LST_RATE_DEG_PER_DAY: f64 = 0.985_647_332;

/// Degrees of rotation per UTC hour
pub const DEG_PER_HOUR: f64 = 15.0;

/// Fixed obliquity of the ecliptic used for the Moon and planets
pub const OBLIQUITY_J2000: f64 = 0.409_099_940_7;

/// Observer latitudes are clamped to ±this value (degrees)
pub const MAX_LATITUDE_DEG: f64 = 89.999_999;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Threshold below which cos(alt)·cos(lat) is treated as singular
pub const SINGULAR_EPSILON: f64 = 1e-12;
