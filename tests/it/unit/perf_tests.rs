//! Unit tests for perf module.

use planboard::perf::{ScopedTimer, INPUT_EVENT_BUDGET_MS, TARGET_FRAME_MS};

#[test]
fn test_scoped_timer_creation() {
    // High threshold: dropping must not warn or panic
    let timer = ScopedTimer::new("test_operation", 1000.0);
    assert_eq!(timer.name(), "test_operation");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_frame_budget_timer() {
    let timer = ScopedTimer::with_frame_budget("frame");
    assert!(timer.elapsed_ms() < 60_000.0);
}

#[test]
fn test_input_budget_fits_in_frame() {
    assert!(INPUT_EVENT_BUDGET_MS < TARGET_FRAME_MS);
}
