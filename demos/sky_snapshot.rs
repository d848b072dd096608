//! Print the sky for the configured observer for a few frames.
//!
//! ```text
//! RUST_LOG=debug SKYCLOCK_SPEED=600 cargo run --example sky_snapshot
//! ```
//!
//! Set `SKYCLOCK_OFFLINE=1` to skip the satellite feed.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use skyclock::config::SkyConfig;
use skyclock::data::WhereTheIssClient;
use skyclock::lighting::Lamp;
use skyclock::satellitelib::{FixPoller, LatestFix};
use skyclock::skylib::SkySnapshot;

const FRAMES: usize = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SkyConfig::from_env()?;
    let observer = config.observer();
    let mut clock = config.sim_clock();
    let mut lamp = Lamp::new();
    let mut rng = rand::thread_rng();

    let offline = std::env::var("SKYCLOCK_OFFLINE").is_ok();
    let mut poller = if offline {
        None
    } else {
        let client = WhereTheIssClient::from_config(&config)?;
        Some(FixPoller::new(Arc::new(client), config.poll_interval()))
    };
    let latest = poller.as_ref().map(FixPoller::latest).unwrap_or_else(LatestFix::new);

    for frame in 0..FRAMES {
        let wall = std::time::Instant::now();
        if let Some(poller) = poller.as_mut() {
            poller.poll_if_due(wall);
        }

        let instant = clock.instant_at(chrono::Utc::now())?;
        let fix = latest.fix();
        let snapshot = SkySnapshot::compute(&instant, &observer, fix.as_ref(), &config.distances);
        let lamp_color = lamp.update(snapshot.sun.altitude, instant.epoch_millis(), &mut rng);

        println!("--- frame {} ({}, HUD {}) ---", frame, snapshot.twilight, snapshot.twilight.hud_color());
        for line in snapshot.hud_lines() {
            println!("{}", line);
        }
        let light = &snapshot.lighting;
        println!(
            "sun light {:.2}, moon light {:.2} (phase {:.2}), ambient {:.2}, lamp ({:.2}, {:.2}, {:.2})",
            light.sun.intensity,
            light.moon.intensity,
            light.moon.illumination,
            light.ambient.intensity,
            lamp_color.r,
            lamp_color.g,
            lamp_color.b
        );
        if snapshot.has_satellite_fix {
            let fresh = latest.is_fresh(wall, config.poll_interval());
            println!("ISS fix is {}", if fresh { "fresh" } else { "aging" });
        }

        let delay_ms = config.frame_delay_ms.max(250);
        clock.advance(delay_ms);
        thread::sleep(Duration::from_millis(delay_ms));
    }

    Ok(())
}
