//! Latest-fix cell and background polling
//!
//! The render loop never waits on the network. Each frame it calls
//! [`FixPoller::poll_if_due`], which at most once per interval spawns a
//! thread that fetches a fix and publishes it into a shared [`LatestFix`].
//! The renderer reads whatever fix is there, or the horizon-north default
//! before the first poll succeeds.
//!
//! Every poll carries a sequence number. A response that arrives after a
//! newer one has already been published is dropped rather than overwriting
//! the fresher fix.

use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use super::{track_position, SatelliteFix};
use crate::toposlib::{HorizontalCoordinate, Observer};
use crate::Result;

/// Anything that can produce a satellite fix on demand
pub trait FixSource: Send + Sync {
    fn fetch(&self) -> Result<SatelliteFix>;
}

/// A fix together with the poll that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedFix {
    pub sequence: u64,
    pub fix: SatelliteFix,
    /// When the request for this fix was sent
    pub dispatched_at: std::time::Instant,
}

/// Single-slot, shareable holder of the most recent fix.
///
/// Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct LatestFix {
    slot: Arc<RwLock<Option<StampedFix>>>,
}

impl LatestFix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `fix` unless a fix from the same or a later poll is already held.
    ///
    /// Returns whether the fix was stored.
    pub fn publish(&self, sequence: u64, fix: SatelliteFix, dispatched_at: std::time::Instant) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = slot.as_ref() {
            if current.sequence >= sequence {
                return false;
            }
        }
        *slot = Some(StampedFix {
            sequence,
            fix,
            dispatched_at,
        });
        true
    }

    pub fn latest(&self) -> Option<StampedFix> {
        *self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fix(&self) -> Option<SatelliteFix> {
        self.latest().map(|stamped| stamped.fix)
    }

    /// Where the satellite is for `observer`, or altitude 0, azimuth 0 with no fix yet.
    pub fn position_for(&self, observer: &Observer) -> HorizontalCoordinate {
        self.fix()
            .map(|fix| track_position(observer, &fix))
            .unwrap_or(HorizontalCoordinate::HORIZON_NORTH)
    }

    /// Whether the held fix is still fresh at `now`.
    ///
    /// A fix stays fresh for half a poll interval after its request was
    /// dispatched. Without a fix this is false.
    pub fn is_fresh(&self, now: std::time::Instant, poll_interval: Duration) -> bool {
        match self.latest() {
            Some(stamped) => now < stamped.dispatched_at + poll_interval / 2,
            None => false,
        }
    }
}

/// Drives periodic fetches from a [`FixSource`] into a [`LatestFix`].
pub struct FixPoller {
    source: Arc<dyn FixSource>,
    latest: LatestFix,
    interval: Duration,
    next_due: Option<std::time::Instant>,
    next_sequence: u64,
}

impl FixPoller {
    pub fn new(source: Arc<dyn FixSource>, interval: Duration) -> Self {
        FixPoller {
            source,
            latest: LatestFix::new(),
            interval,
            next_due: None,
            next_sequence: 0,
        }
    }

    /// A handle on the cell this poller publishes into
    pub fn latest(&self) -> LatestFix {
        self.latest.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a background fetch if the interval has elapsed since the last one.
    ///
    /// The first call always polls. Returns the fetch thread's handle when a
    /// poll was started; callers normally drop it.
    pub fn poll_if_due(&mut self, now: std::time::Instant) -> Option<JoinHandle<()>> {
        if let Some(due) = self.next_due {
            if now < due {
                return None;
            }
        }
        self.next_due = Some(now + self.interval);

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let source = Arc::clone(&self.source);
        let latest = self.latest.clone();

        debug!("dispatching satellite poll {}", sequence);
        Some(thread::spawn(move || {
            fetch_and_publish(&*source, &latest, sequence, now);
        }))
    }

    /// Fetch on the calling thread, ignoring the interval.
    ///
    /// Returns whether a new fix was published.
    pub fn poll_blocking(&mut self, now: std::time::Instant) -> bool {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.next_due = Some(now + self.interval);
        fetch_and_publish(&*self.source, &self.latest, sequence, now)
    }
}

fn fetch_and_publish(source: &dyn FixSource, latest: &LatestFix, sequence: u64, dispatched_at: std::time::Instant) -> bool {
    match source.fetch() {
        Ok(fix) => {
            let published = latest.publish(sequence, fix, dispatched_at);
            if published {
                debug!(
                    "satellite fix {} published: lat {:.4} lon {:.4} alt {:.1} km",
                    sequence, fix.latitude_degrees, fix.longitude_degrees, fix.altitude_km
                );
            } else {
                debug!("satellite fix {} arrived after a newer one; dropped", sequence);
            }
            published
        }
        Err(e) => {
            warn!("satellite poll {} failed: {}", sequence, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkyclockError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct FixedSource {
        fix: SatelliteFix,
        calls: AtomicUsize,
    }

    impl FixSource for FixedSource {
        fn fetch(&self) -> Result<SatelliteFix> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fix)
        }
    }

    struct FailingSource;

    impl FixSource for FailingSource {
        fn fetch(&self) -> Result<SatelliteFix> {
            Err(SkyclockError::FeedError("connection refused".to_string()))
        }
    }

    fn fixed(fix: SatelliteFix) -> Arc<FixedSource> {
        Arc::new(FixedSource {
            fix,
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_default_position_before_first_fix() {
        let latest = LatestFix::new();
        assert!(latest.latest().is_none());
        let pos = latest.position_for(&Observer::new(33.7695, -84.3857));
        assert_eq!(pos, HorizontalCoordinate::new(0.0, 0.0));
        assert!(!latest.is_fresh(Instant::now(), Duration::from_millis(2000)));
    }

    #[test]
    fn test_late_response_does_not_overwrite_newer() {
        let latest = LatestFix::new();
        let t0 = Instant::now();
        let newer = SatelliteFix::new(10.0, 20.0, 420.0);
        let older = SatelliteFix::new(-5.0, 100.0, 419.0);

        assert!(latest.publish(2, newer, t0));
        assert!(!latest.publish(1, older, t0));
        assert!(!latest.publish(2, older, t0));
        assert_eq!(latest.fix(), Some(newer));

        assert!(latest.publish(3, older, t0));
        assert_eq!(latest.latest().map(|s| s.sequence), Some(3));
    }

    #[test]
    fn test_clones_share_the_slot() {
        let latest = LatestFix::new();
        let reader = latest.clone();
        latest.publish(0, SatelliteFix::new(1.0, 2.0, 3.0), Instant::now());
        assert_eq!(reader.fix(), Some(SatelliteFix::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_freshness_window_is_half_interval() {
        let latest = LatestFix::new();
        let t0 = Instant::now();
        let interval = Duration::from_millis(2000);
        latest.publish(0, SatelliteFix::new(0.0, 0.0, 400.0), t0);
        assert!(latest.is_fresh(t0, interval));
        assert!(latest.is_fresh(t0 + Duration::from_millis(999), interval));
        assert!(!latest.is_fresh(t0 + Duration::from_millis(1000), interval));
    }

    #[test]
    fn test_poller_respects_interval() {
        let source = fixed(SatelliteFix::new(0.0, 0.0, 400.0));
        let mut poller = FixPoller::new(source.clone(), Duration::from_millis(2000));
        let t0 = Instant::now();

        let first = poller.poll_if_due(t0).expect("first call polls");
        first.join().unwrap();
        assert!(poller.poll_if_due(t0 + Duration::from_millis(1999)).is_none());

        let second = poller.poll_if_due(t0 + Duration::from_millis(2000)).expect("due again");
        second.join().unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(poller.latest().latest().map(|s| s.sequence), Some(1));
    }

    #[test]
    fn test_poller_publishes_fix() {
        let fix = SatelliteFix::new(0.0, 0.0, 400.0);
        let mut poller = FixPoller::new(fixed(fix), Duration::from_millis(2000));
        let reader = poller.latest();
        poller.poll_if_due(Instant::now()).unwrap().join().unwrap();

        let pos = reader.position_for(&Observer::new(0.0, 0.0));
        assert!((pos.altitude - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_failed_poll_keeps_previous_fix() {
        let mut poller = FixPoller::new(Arc::new(FailingSource), Duration::from_millis(2000));
        let t0 = Instant::now();
        poller.latest().publish(0, SatelliteFix::new(1.0, 1.0, 400.0), t0);
        poller.next_sequence = 1;

        assert!(!poller.poll_blocking(t0));
        assert_eq!(poller.latest().fix(), Some(SatelliteFix::new(1.0, 1.0, 400.0)));
    }
}
