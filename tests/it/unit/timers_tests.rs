//! Unit tests for the deterministic timer queue.

use planboard::input::TimerQueue;
use std::time::{Duration, Instant};

#[test]
fn test_fires_in_due_order() {
    let t0 = Instant::now();
    let mut timers = TimerQueue::new();
    timers.schedule(t0, Duration::from_millis(300), "late");
    timers.schedule(t0, Duration::from_millis(100), "early");
    timers.schedule(t0, Duration::from_millis(100), "early-second");

    assert!(timers.drain_due(t0 + Duration::from_millis(99)).is_empty());
    assert_eq!(
        timers.drain_due(t0 + Duration::from_millis(500)),
        vec!["early", "early-second", "late"]
    );
    assert_eq!(timers.pending(), 0);
}

#[test]
fn test_cancelled_timer_never_fires() {
    let t0 = Instant::now();
    let mut timers = TimerQueue::new();
    let handle = timers.schedule(t0, Duration::from_millis(600), 1);
    timers.schedule(t0, Duration::from_millis(700), 2);

    handle.cancel();
    assert!(!handle.is_live());
    assert_eq!(timers.next_due(), Some(t0 + Duration::from_millis(700)));
    assert_eq!(timers.drain_due(t0 + Duration::from_secs(1)), vec![2]);
}

#[test]
fn test_fired_timer_handle_goes_stale() {
    let t0 = Instant::now();
    let mut timers = TimerQueue::new();
    let handle = timers.schedule(t0, Duration::ZERO, ());
    assert!(handle.is_live());
    timers.drain_due(t0);
    assert!(!handle.is_live());
}

#[test]
fn test_clear_invalidates_handles() {
    let t0 = Instant::now();
    let mut timers = TimerQueue::new();
    let handle = timers.schedule(t0, Duration::from_millis(10), ());
    timers.clear();
    assert!(!handle.is_live());
    assert_eq!(timers.next_due(), None);
}
