//! Simulated live-location polling.
//!
//! Two states, Idle and Polling. Each tick jitters a fixed base
//! coordinate, overwrites the record's coordinates and renders a fresh
//! map artifact. Only one poll may run at a time; starting a second one
//! while active is rejected.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

use crate::logger::StatusLogger;
use crate::map::MapRenderer;
use crate::record::{Coordinates, TrackedRecord};

#[derive(Error, Debug)]
pub enum PollError {
    #[error("a live-tracking session is already active")]
    AlreadyPolling,

    #[error("poll duration must be greater than zero")]
    ZeroDuration,
}

/// What a completed polling run produced.
#[derive(Debug, Default)]
pub struct PollReport {
    pub ticks: u32,
    pub artifacts: Vec<PathBuf>,
}

pub struct LivePoller {
    renderer: MapRenderer,
    logger: StatusLogger,
    interval: Duration,
    base: Coordinates,
    jitter_degrees: f64,
    active: AtomicBool,
}

impl LivePoller {
    pub fn new(
        renderer: MapRenderer,
        logger: StatusLogger,
        interval: Duration,
        base: Coordinates,
        jitter_degrees: f64,
    ) -> Self {
        LivePoller {
            renderer,
            logger,
            interval,
            base,
            jitter_degrees,
            active: AtomicBool::new(false),
        }
    }

    pub fn is_polling(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Synthetic coordinate: the base jittered by a bounded uniform
    /// offset on each axis. Always finite given a finite base and bound.
    pub fn jittered(&self) -> Coordinates {
        let j = self.jitter_degrees;
        let (dlat, dlon) = if j > 0.0 {
            (rand::random_range(-j..=j), rand::random_range(-j..=j))
        } else {
            (0.0, 0.0)
        };
        Coordinates::new(self.base.lat() + dlat, self.base.lon() + dlon)
            .unwrap_or(self.base)
    }

    /// Run the polling loop for `duration`, ticking immediately and then
    /// every interval while the elapsed time stays below the duration.
    /// With a 25s duration and 10s interval this produces exactly three
    /// ticks (t=0, 10, 20) before returning to Idle.
    pub async fn start(
        &self,
        record: &mut TrackedRecord,
        duration: Duration,
    ) -> Result<PollReport, PollError> {
        if duration.is_zero() {
            return Err(PollError::ZeroDuration);
        }
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(PollError::AlreadyPolling);
        }

        let expected_ticks = expected_tick_count(duration, self.interval);
        self.logger
            .info(&format!("Starting live tracking for {}...", record.identifier.display()));
        self.logger.start_progress(expected_ticks).await;

        let started = Instant::now();
        let mut report = PollReport::default();

        loop {
            let coords = self.jittered();
            record.coordinates = Some(coords);
            report.ticks += 1;
            self.logger.log_poll_tick(report.ticks, &coords.to_string());

            // A failed render ends the tick, not the whole run
            match self.renderer.render(record) {
                Ok(path) => {
                    self.logger.log_render_success(&path.display().to_string());
                    report.artifacts.push(path);
                }
                Err(e) => self.logger.warn(&format!("render failed: {}", e)),
            }
            self.logger
                .advance_progress(&format!("live location {}", coords))
                .await;

            // Stop early when the next tick would land past the deadline
            if started.elapsed() + self.interval >= duration {
                break;
            }
            tokio::time::sleep(self.interval).await;
        }

        self.logger
            .finish_progress(&format!(
                "Live tracking finished: {} tick(s), {} map(s) written",
                report.ticks,
                report.artifacts.len()
            ))
            .await;
        self.active.store(false, Ordering::SeqCst);
        Ok(report)
    }
}

/// Number of ticks a run of `duration` will perform at `interval`:
/// one at t=0 plus one per full interval strictly inside the duration.
fn expected_tick_count(duration: Duration, interval: Duration) -> u64 {
    if interval.is_zero() {
        return 1;
    }
    let mut ticks = 1u64;
    let mut elapsed = interval;
    while elapsed < duration {
        ticks += 1;
        elapsed += interval;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_tick_count_boundary() {
        // 25s at 10s intervals: ticks at t=0, 10, 20
        assert_eq!(
            expected_tick_count(Duration::from_secs(25), Duration::from_secs(10)),
            3
        );
        // Exact multiple: the tick at t=duration does not run
        assert_eq!(
            expected_tick_count(Duration::from_secs(20), Duration::from_secs(10)),
            2
        );
        assert_eq!(
            expected_tick_count(Duration::from_secs(5), Duration::from_secs(10)),
            1
        );
    }
}
