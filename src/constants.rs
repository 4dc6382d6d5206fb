//! Application-wide constants.
//!
//! Centralizes handle geometry, zoom limits and timing thresholds so the
//! hit tester, the editor and the settings defaults agree on them.

// ============================================================================
// Handle Geometry
// ============================================================================

/// Visual edge length of a handle square in pixels
pub const HANDLE_SIZE: f32 = 10.0;

/// Invisible tolerance added around each handle for hit testing
pub const HANDLE_HIT_MARGIN: f32 = 8.0;

/// Distance from the layer's right edge to the rotate handle center
pub const ROTATE_HANDLE_OFFSET: f32 = 24.0;

// ============================================================================
// Canvas Frame
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

// ============================================================================
// Seed Layer
// ============================================================================

/// Size of the layer seeded when no settings file provides layers
pub const DEFAULT_LAYER_SIZE: (f32, f32) = (200.0, 100.0);

/// Top-left position of the default seeded layer
pub const DEFAULT_LAYER_POSITION: (f32, f32) = (100.0, 100.0);

// ============================================================================
// Timing
// ============================================================================

/// Dispatch budget: one event should be routed and reduced well inside a frame
pub const TARGET_DISPATCH_MS: f64 = 4.0;

// ============================================================================
// Settings
// ============================================================================

/// Directory name under the platform config dir
pub const SETTINGS_DIR_NAME: &str = "layerboard";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";
