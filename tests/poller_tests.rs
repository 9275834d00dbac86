use std::sync::Arc;
use std::time::Duration;

use numintel::logger::{StatusLogger, VerbosityLevel};
use numintel::map::MapRenderer;
use numintel::poller::{LivePoller, PollError};
use numintel::record::{Coordinates, TrackedRecord};
use numintel::PhoneIdentifier;

const BASE_LAT: f64 = 17.385044;
const BASE_LON: f64 = 78.486671;
const JITTER: f64 = 0.05;

fn poller(output_dir: std::path::PathBuf, interval: Duration) -> LivePoller {
    LivePoller::new(
        MapRenderer::new(output_dir, 9),
        StatusLogger::new(VerbosityLevel::Silent),
        interval,
        Coordinates::new(BASE_LAT, BASE_LON).unwrap(),
        JITTER,
    )
}

fn record() -> TrackedRecord {
    TrackedRecord::new(PhoneIdentifier::normalize("+91 98765 43210").unwrap())
}

#[test]
fn test_jitter_stays_within_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let p = poller(dir.path().to_path_buf(), Duration::from_secs(10));

    for _ in 0..200 {
        let coords = p.jittered();
        assert!((coords.lat() - BASE_LAT).abs() <= JITTER + 1e-12);
        assert!((coords.lon() - BASE_LON).abs() <= JITTER + 1e-12);
    }
}

#[tokio::test]
async fn test_tick_count_for_duration_between_multiples() {
    // 250ms at 100ms intervals: ticks at t=0, 100, 200
    let dir = tempfile::tempdir().unwrap();
    let p = poller(dir.path().to_path_buf(), Duration::from_millis(100));
    let mut rec = record();

    let report = p.start(&mut rec, Duration::from_millis(250)).await.unwrap();

    assert_eq!(report.ticks, 3);
    assert_eq!(report.artifacts.len(), 3);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    assert!(!p.is_polling(), "poller must return to idle");
}

#[tokio::test]
async fn test_single_tick_when_duration_equals_interval() {
    let dir = tempfile::tempdir().unwrap();
    let p = poller(dir.path().to_path_buf(), Duration::from_millis(100));
    let mut rec = record();

    let report = p.start(&mut rec, Duration::from_millis(100)).await.unwrap();
    assert_eq!(report.ticks, 1);
}

#[tokio::test]
async fn test_each_tick_overwrites_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let p = poller(dir.path().to_path_buf(), Duration::from_millis(50));
    let mut rec = record();
    assert!(rec.coordinates.is_none());

    p.start(&mut rec, Duration::from_millis(120)).await.unwrap();

    let coords = rec.coordinates.expect("polling populates coordinates");
    assert!((coords.lat() - BASE_LAT).abs() <= JITTER + 1e-12);
    assert!((coords.lon() - BASE_LON).abs() <= JITTER + 1e-12);
}

#[tokio::test]
async fn test_zero_duration_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = poller(dir.path().to_path_buf(), Duration::from_millis(50));
    let mut rec = record();

    let err = p.start(&mut rec, Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, PollError::ZeroDuration));
}

#[tokio::test]
async fn test_concurrent_poll_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = Arc::new(poller(dir.path().to_path_buf(), Duration::from_millis(100)));

    let first = {
        let p = Arc::clone(&p);
        tokio::spawn(async move {
            let mut rec = record();
            p.start(&mut rec, Duration::from_millis(400)).await
        })
    };

    // Let the first poll take the active slot
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(p.is_polling());

    let mut rec = record();
    let err = p.start(&mut rec, Duration::from_millis(100)).await.unwrap_err();
    assert!(matches!(err, PollError::AlreadyPolling));

    let report = first.await.unwrap().unwrap();
    assert!(report.ticks >= 1);
    assert!(!p.is_polling());
}
