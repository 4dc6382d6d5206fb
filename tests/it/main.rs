//! Single test binary entry point.
//!
//! All integration tests link into one binary to keep link time down.
//!
//! Structure:
//! - helpers: Builders, event constructors and float assertions
//! - integration: Raw events through the editor down to layer geometry
//! - unit: Single-component tests against the public API

mod integration;
