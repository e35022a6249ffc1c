//! Unit tests for planboard.

mod path_tests;
mod perf_tests;
mod scene_tests;
mod settings_tests;
mod snap_tests;
mod timers_tests;
mod viewport_tests;
