//! Integration tests for Layerboard.
//!
//! These tests drive the editor with raw pointer and touch events and check
//! the resulting layer geometry end-to-end.

mod lifecycle_tests;
