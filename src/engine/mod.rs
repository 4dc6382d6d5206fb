//! Gesture/state engine.
//!
//! The engine owns the layer collection and the gesture snapshot. All
//! changes go through [`reduce`], a pure function from `(state, action)` to the
//! next state. [`Engine`] is a thin owner that applies actions in order and
//! logs each transition.
//!
//! ## Modules
//!
//! - `action` - The closed set of actions
//! - `state` - Editor state, gesture snapshot and the reducer

mod action;
mod state;

pub use action::Action;
pub use state::{EditorState, GestureSnapshot, reduce};

use crate::types::LayerCollection;
use tracing::trace;

/// Owner of the current [`EditorState`].
#[derive(Debug, Default)]
pub struct Engine {
    state: EditorState,
}

impl Engine {
    pub fn new(layers: LayerCollection) -> Self {
        Self {
            state: EditorState::new(layers),
        }
    }

    /// Apply one action. Returns true if the layer collection changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let previous = std::mem::take(&mut self.state);
        let before = previous.layers().clone();
        self.state = reduce(previous, &action);

        let changed = !self.state.layers().same_as(&before);
        trace!(
            action = action.name(),
            changed,
            tracked = self.state.snapshot().len(),
            "Dispatched"
        );
        changed
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn layers(&self) -> &LayerCollection {
        self.state.layers()
    }

    /// True while a gesture snapshot is held
    pub fn is_gesture_active(&self) -> bool {
        !self.state.snapshot().is_empty()
    }
}
