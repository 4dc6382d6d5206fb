//! Editor state and the pure reduction function.
//!
//! ## Snapshot model
//!
//! ```text
//! Idle --MoveStarted--> Active(snapshot) --MoveEnded--> Idle
//!                         |        ^
//!                         +--------+ Moved / Resized (relative to snapshot)
//! ```
//!
//! Deltas carried by `Moved` and `Resized` are cumulative from the gesture
//! start and always applied to the snapshot, never to the live layer. Replaying
//! the same delta twice therefore lands on the same geometry.

use super::action::Action;
use crate::profile_scope;
use crate::types::{Layer, LayerCollection, LayerId, Transform};
use std::collections::HashMap;
use tracing::debug;

/// Per-layer geometry captured when a gesture starts.
///
/// Only the engine creates or clears snapshots; callers get read-only queries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureSnapshot {
    entries: HashMap<LayerId, Transform>,
}

impl GestureSnapshot {
    fn capture(layers: &LayerCollection) -> Self {
        Self {
            entries: layers.iter().map(|layer| (layer.id, layer.transform())).collect(),
        }
    }

    fn get(&self, id: LayerId) -> Option<&Transform> {
        self.entries.get(&id)
    }

    /// True if a gesture is tracking `id`
    pub fn is_tracking(&self, id: LayerId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Layers plus the snapshot of the gesture in progress, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    layers: LayerCollection,
    snapshot: GestureSnapshot,
}

impl EditorState {
    /// Fresh state with no gesture in progress.
    pub fn new(layers: LayerCollection) -> Self {
        Self {
            layers,
            snapshot: GestureSnapshot::default(),
        }
    }

    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    pub fn snapshot(&self) -> &GestureSnapshot {
        &self.snapshot
    }

    pub fn into_layers(self) -> LayerCollection {
        self.layers
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// Layers without a snapshot ignore `Moved`/`Resized`, an unknown id makes
/// `Rotated` a no-op, and a taken id makes `LayerAdded` a no-op. In every
/// no-op case the returned collection is the same storage as the input's.
pub fn reduce(state: EditorState, action: &Action) -> EditorState {
    profile_scope!("reduce");

    match *action {
        Action::MoveStarted => EditorState {
            snapshot: GestureSnapshot::capture(&state.layers),
            ..state
        },
        Action::Moved { dx, dy } => {
            let layers = state.layers.map_changed(|layer| {
                state.snapshot.get(layer.id).map(|base| Layer {
                    position_x: base.position_x + dx,
                    position_y: base.position_y + dy,
                    ..*layer
                })
            });
            EditorState { layers, ..state }
        }
        Action::Resized { dx, dy } => {
            // No minimum size: a drag past the origin yields negative extents
            let layers = state.layers.map_changed(|layer| {
                state.snapshot.get(layer.id).map(|base| Layer {
                    width: base.width + dx,
                    height: base.height + dy,
                    ..*layer
                })
            });
            EditorState { layers, ..state }
        }
        Action::MoveEnded => EditorState {
            snapshot: GestureSnapshot::default(),
            ..state
        },
        Action::Rotated { id, theta } => {
            if !state.layers.contains(id) {
                debug!(layer = id, "Rotate for unknown layer ignored");
                return state;
            }
            let layers = state.layers.map_changed(|layer| {
                (layer.id == id).then_some(Layer {
                    rotate: theta,
                    ..*layer
                })
            });
            EditorState { layers, ..state }
        }
        Action::LayerAdded(layer) => {
            if state.layers.contains(layer.id) {
                debug!(layer = layer.id, "Layer id already taken, add ignored");
                return state;
            }
            EditorState {
                layers: state.layers.appended(layer),
                ..state
            }
        }
    }
}
