//! Single test binary entry point.
//!
//! All tests link into one binary to keep build and link time down.
//!
//! Structure:
//! - helpers: Scene builder and a host that records every call
//! - integration: Gesture-to-scene workflows through the `Editor`
//! - unit: Single-component tests against the public API

mod unit;
