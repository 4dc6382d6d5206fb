//! Layerboard - gesture normalization and layer transforms for a canvas editor.
//!
//! Rectangular layers are dragged, resized from a corner handle and rotated
//! from a rotate handle. Rendering is left to the host; this crate turns raw
//! pointer and touch events into new, immutable layer collections.
//!
//! ## Modules
//!
//! - `input` - Event normalization, listener bindings, interaction state
//! - `engine` - Actions, gesture snapshots and the pure reducer
//! - `editor` - Glue between bindings, hit testing and the engine
//! - `geometry` - Points, rotation angle, layer and handle geometry
//! - `hit_testing` / `spatial_index` - Element lookup under the pointer
//! - `settings` / `settings_watcher` - JSON configuration and hot-reload
//! - `perf` - Dispatch timing and profiling scopes

pub mod constants;
pub mod editor;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit_testing;
pub mod input;
pub mod perf;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod types;

pub use editor::Editor;
pub use engine::{Action, EditorState, Engine, reduce};
pub use types::{Layer, LayerCollection, LayerId};
