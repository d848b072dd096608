//! Time basis for the sky engine
//!
//! Every position query starts here: an [`Instant`] is reduced to a
//! continuous day count since 2000-01-01T12:00 UTC and, together with the
//! observer's longitude, to a local sidereal time (LST) in radians.
//!
//! The sidereal formula is the short linear one,
//!
//! ```text
//! LST = (100.46 + 0.985647332·n + longitude + 15·UTC_hours) mod 360   [degrees]
//! ```
//!
//! with a true (Euclidean) modulo so the result never goes negative for
//! instants before the epoch or for western longitudes.

use chrono::{DateTime, FixedOffset, TimeDelta, Timelike, Utc};

use crate::constants::{
    DEG_PER_HOUR, J2000_UNIX_MS, LST_BASE_DEG, LST_RATE_DEG_PER_DAY, MS_PER_DAY,
};
use crate::units::wrap_degrees;
use crate::{Result, SkyclockError};

/// An absolute point in time carrying the UTC offset it should be displayed in.
///
/// Two instants with different display offsets but the same absolute time
/// produce identical astronomy; the offset only matters for clock text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant {
    local: DateTime<FixedOffset>,
}

impl Instant {
    /// Build an instant from a UTC timestamp and a display offset in minutes east of UTC.
    pub fn from_utc(utc: DateTime<Utc>, utc_offset_minutes: i32) -> Result<Self> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                SkyclockError::DataError(format!(
                    "UTC offset of {} minutes is out of range",
                    utc_offset_minutes
                ))
            })?;
        Ok(Instant {
            local: utc.with_timezone(&offset),
        })
    }

    /// Build an instant from milliseconds since the Unix epoch.
    pub fn from_epoch_millis(epoch_millis: i64, utc_offset_minutes: i32) -> Result<Self> {
        let utc = DateTime::<Utc>::from_timestamp_millis(epoch_millis).ok_or_else(|| {
            SkyclockError::DataError(format!(
                "{} ms since the Unix epoch is not a representable instant",
                epoch_millis
            ))
        })?;
        Self::from_utc(utc, utc_offset_minutes)
    }

    /// The reference instant 2000-01-01T12:00:00 UTC (day count 0).
    pub fn reference_epoch() -> Result<Self> {
        Self::from_epoch_millis(J2000_UNIX_MS, 0)
    }

    /// Milliseconds since the Unix epoch
    pub fn epoch_millis(&self) -> i64 {
        self.local.timestamp_millis()
    }

    /// Wall-clock fields in the display offset
    pub fn local(&self) -> DateTime<FixedOffset> {
        self.local
    }

    /// The same instant in UTC
    pub fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }

    /// Display offset in minutes east of UTC
    pub fn utc_offset_minutes(&self) -> i32 {
        self.local.offset().local_minus_utc() / 60
    }

    /// Days since the reference epoch, see [`day_count`].
    pub fn day_count(&self) -> f64 {
        day_count(self)
    }

    /// Fractional UTC hour of day.
    ///
    /// Whole seconds only: sub-second precision is dropped, matching the
    /// clock fields the sidereal formula was tuned against.
    pub fn utc_hours(&self) -> f64 {
        let utc = self.utc();
        utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0
    }

    /// Local sidereal time at `longitude_degrees`, see [`local_sidereal_time`].
    pub fn local_sidereal_time(&self, longitude_degrees: f64) -> f64 {
        local_sidereal_time(self, longitude_degrees)
    }

    /// Shift by a signed number of milliseconds, keeping the display offset.
    pub fn offset_by_millis(&self, millis: i64) -> Result<Self> {
        let delta = TimeDelta::try_milliseconds(millis).ok_or_else(|| {
            SkyclockError::DataError(format!("time shift of {} ms is out of range", millis))
        })?;
        let local = self.local.checked_add_signed(delta).ok_or_else(|| {
            SkyclockError::DataError(format!("shifting by {} ms leaves the calendar", millis))
        })?;
        Ok(Instant { local })
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}

/// Days since 2000-01-01T12:00 UTC. Negative before the epoch.
pub fn day_count(instant: &Instant) -> f64 {
    (instant.epoch_millis() - J2000_UNIX_MS) as f64 / MS_PER_DAY
}

/// Local sidereal time in radians, always in [0, 2π).
///
/// # Arguments
/// * `instant` - the moment of observation
/// * `longitude_degrees` - observer longitude, positive east, not normalised
pub fn local_sidereal_time(instant: &Instant, longitude_degrees: f64) -> f64 {
    sidereal_angle(day_count(instant), instant.utc_hours(), longitude_degrees)
}

/// Sidereal angle from its raw ingredients, in radians within [0, 2π).
pub fn sidereal_angle(day_count: f64, utc_hours: f64, longitude_degrees: f64) -> f64 {
    let degrees = LST_BASE_DEG
        + LST_RATE_DEG_PER_DAY * day_count
        + longitude_degrees
        + DEG_PER_HOUR * utc_hours;
    wrap_degrees(degrees).to_radians()
}

/// A clock that can run faster or slower than real time.
///
/// Each rendered frame calls [`SimClock::advance`] with the frame delay;
/// the accumulated offset is `(speed − 1)·delay` per frame, so at speed 1
/// the simulated clock tracks the wall clock exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    offset_ms: f64,
    speed: f64,
    utc_offset_minutes: i32,
}

impl SimClock {
    /// Create a clock starting `offset_ms` ahead of wall time.
    pub fn new(offset_ms: i64, speed: f64, utc_offset_minutes: i32) -> Self {
        SimClock {
            offset_ms: offset_ms as f64,
            speed,
            utc_offset_minutes,
        }
    }

    /// Accumulate one frame's worth of drift.
    pub fn advance(&mut self, frame_delay_ms: u64) {
        self.offset_ms += (self.speed - 1.0) * frame_delay_ms as f64;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Step one notch down the speed ladder.
    ///
    /// The ladder runs through powers of ten on both sides of zero:
    /// `…, 10, 1, -10, -100, …`. From real time it jumps straight to -10.
    pub fn slower(&mut self) {
        self.speed = if self.speed == 1.0 {
            -10.0
        } else if self.speed > 0.0 {
            self.speed / 10.0
        } else {
            self.speed * 10.0
        };
    }

    /// Step one notch up the speed ladder; from -1 it jumps to 10.
    pub fn faster(&mut self) {
        self.speed = if self.speed == -1.0 {
            10.0
        } else if self.speed < 0.0 {
            self.speed / 10.0
        } else {
            self.speed * 10.0
        };
    }

    /// Current lead (or lag, if negative) over the wall clock in milliseconds
    pub fn offset_ms(&self) -> f64 {
        self.offset_ms
    }

    /// The simulated instant corresponding to wall-clock `now`.
    pub fn instant_at(&self, now: DateTime<Utc>) -> Result<Instant> {
        Instant::from_utc(now, self.utc_offset_minutes)?.offset_by_millis(self.offset_ms.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use std::f64::consts::PI;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        let dt = Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap();
        Instant::from_utc(dt, 0).unwrap()
    }

    fn angle_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(2.0 * PI);
        d.min(2.0 * PI - d)
    }

    #[test]
    fn test_day_count_at_reference_epoch() {
        let t = Instant::reference_epoch().unwrap();
        assert_eq!(t.epoch_millis(), J2000_UNIX_MS);
        assert_relative_eq!(t.day_count(), 0.0);
    }

    #[test]
    fn test_day_count_fraction_and_sign() {
        // 18:00 UTC is a quarter day after the noon epoch
        assert_relative_eq!(utc(2000, 1, 1, 18, 0, 0).day_count(), 0.25, epsilon = 1e-12);
        // Midnight before the epoch is half a day earlier
        assert_relative_eq!(utc(2000, 1, 1, 0, 0, 0).day_count(), -0.5, epsilon = 1e-12);
        assert!(utc(1990, 1, 1, 0, 0, 0).day_count() < -3000.0);
    }

    #[test]
    fn test_display_offset_does_not_change_day_count() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let tokyo = Instant::from_utc(dt, 9 * 60).unwrap();
        let ny = Instant::from_utc(dt, -5 * 60).unwrap();
        assert_relative_eq!(tokyo.day_count(), ny.day_count());
        assert_relative_eq!(tokyo.utc_hours(), 12.0);
        assert_eq!(tokyo.local().hour(), 21);
        assert_eq!(ny.utc_offset_minutes(), -300);
    }

    #[test]
    fn test_invalid_offset_rejected() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        assert!(Instant::from_utc(dt, 24 * 60).is_err());
    }

    #[test]
    fn test_utc_hours_drops_milliseconds() {
        let t = Instant::from_epoch_millis(J2000_UNIX_MS + 1_500, 0).unwrap();
        assert_relative_eq!(t.utc_hours(), 12.0 + 1.0 / 3600.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lst_at_epoch_greenwich() {
        // n = 0, noon UTC: 100.46 + 180 degrees
        let t = Instant::reference_epoch().unwrap();
        let lst = t.local_sidereal_time(0.0);
        assert_relative_eq!(lst, (280.46_f64).to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_lst_in_range_before_epoch_and_west() {
        // Raw sum is about -3500 degrees here; a remainder would go negative
        let t = utc(1990, 1, 1, 0, 0, 0);
        for lon in [-179.9, -84.3857, 0.0, 45.0, 179.9] {
            let lst = t.local_sidereal_time(lon);
            assert!(
                (0.0..2.0 * PI).contains(&lst),
                "LST out of range for lon {}: {}",
                lon,
                lst
            );
        }
    }

    #[test]
    fn test_lst_periodic_in_longitude() {
        let t = utc(2024, 6, 21, 3, 17, 42);
        for lon in [-200.0, -84.3857, 0.0, 12.5, 359.0] {
            let a = t.local_sidereal_time(lon);
            let b = t.local_sidereal_time(lon + 360.0);
            assert!(angle_diff(a, b) < 1e-9, "lon {}: {} vs {}", lon, a, b);
        }
    }

    #[test]
    fn test_lst_east_is_ahead() {
        let t = utc(2024, 6, 21, 0, 0, 0);
        let g = t.local_sidereal_time(0.0);
        let e = t.local_sidereal_time(90.0);
        assert!(angle_diff(e - g, PI / 2.0) < 1e-9);
    }

    #[test]
    fn test_sidereal_angle_wraps_exactly_at_full_turn() {
        // 100.46 + 259.54 = 360 exactly lands on zero, not 2π
        let a = sidereal_angle(0.0, 0.0, 259.54);
        assert!(a < 2.0 * PI);
        assert!(angle_diff(a, 0.0) < 1e-9);
    }

    #[test]
    fn test_sim_clock_real_time_at_speed_one() {
        let mut clock = SimClock::new(0, 1.0, 0);
        for _ in 0..100 {
            clock.advance(25);
        }
        assert_relative_eq!(clock.offset_ms(), 0.0);
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(clock.instant_at(now).unwrap().utc(), now);
    }

    #[test]
    fn test_sim_clock_fast_forward() {
        // Speed 61 gains 60 ms per elapsed ms
        let mut clock = SimClock::new(1_000, 61.0, 120);
        clock.advance(1_000);
        assert_relative_eq!(clock.offset_ms(), 61_000.0);

        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t = clock.instant_at(now).unwrap();
        assert_eq!(t.epoch_millis() - now.timestamp_millis(), 61_000);
        assert_eq!(t.utc_offset_minutes(), 120);
    }

    #[test]
    fn test_sim_clock_reverse() {
        let mut clock = SimClock::new(0, 0.0, 0);
        clock.advance(500);
        assert_relative_eq!(clock.offset_ms(), -500.0);
        clock.set_speed(2.0);
        clock.advance(500);
        assert_relative_eq!(clock.offset_ms(), 0.0);
        assert_relative_eq!(clock.speed(), 2.0);
    }

    #[test]
    fn test_speed_ladder() {
        let mut clock = SimClock::new(0, 1.0, 0);
        clock.slower();
        assert_eq!(clock.speed(), -10.0);
        clock.slower();
        assert_eq!(clock.speed(), -100.0);

        clock.faster();
        assert_eq!(clock.speed(), -10.0);
        clock.faster();
        assert_eq!(clock.speed(), -1.0);
        clock.faster();
        assert_eq!(clock.speed(), 10.0);
        clock.faster();
        assert_eq!(clock.speed(), 100.0);

        clock.slower();
        clock.slower();
        assert_eq!(clock.speed(), 1.0);
        clock.slower();
        assert_eq!(clock.speed(), -10.0);
    }

    #[test]
    fn test_display() {
        let t = utc(2024, 3, 20, 12, 0, 0);
        assert_eq!(t.to_string(), "2024-03-20 12:00:00 +00:00");
    }
}
