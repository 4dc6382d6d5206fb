//! Interaction state machine - which gesture, if any, the editor is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging     (gesture starts on a layer body)
//! Idle -> Resizing     (gesture starts on a resize handle)
//! Idle -> Rotating     (gesture starts on a rotate handle)
//!
//! Any -> Idle          (gesture end)
//! ```

use super::event::ElementId;
use crate::geometry::Point;
use crate::types::LayerId;

/// Gesture currently driving the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No active gesture
    #[default]
    Idle,

    /// Translating layers
    Dragging {
        /// Layer under the pointer at gesture start
        layer: LayerId,
    },

    /// Resizing via the corner handle
    Resizing { layer: LayerId },

    /// Rotating via the rotate handle
    Rotating {
        layer: LayerId,
        /// Layer center in canvas coordinates, fixed for the gesture
        pivot: Point,
    },
}

impl InteractionState {
    /// State entered when a gesture starts on `element`.
    ///
    /// `pivot` is only consulted for rotate handles. The canvas itself starts
    /// nothing.
    pub fn for_element(element: ElementId, pivot: Point) -> Self {
        match element {
            ElementId::Canvas => Self::Idle,
            ElementId::Layer(layer) => Self::Dragging { layer },
            ElementId::ResizeHandle(layer) => Self::Resizing { layer },
            ElementId::RotateHandle(layer) => Self::Rotating { layer, pivot },
        }
    }

    /// Element holding pointer capture while this gesture runs
    pub fn captured_element(&self) -> Option<ElementId> {
        match *self {
            Self::Idle => None,
            Self::Dragging { layer } => Some(ElementId::Layer(layer)),
            Self::Resizing { layer } => Some(ElementId::ResizeHandle(layer)),
            Self::Rotating { layer, .. } => Some(ElementId::RotateHandle(layer)),
        }
    }

    /// Layer the active gesture started on
    pub fn layer(&self) -> Option<LayerId> {
        match *self {
            Self::Idle => None,
            Self::Dragging { layer } | Self::Resizing { layer } | Self::Rotating { layer, .. } => {
                Some(layer)
            }
        }
    }

    /// Whether the gesture needs a snapshot (move and resize are relative)
    pub fn uses_snapshot(&self) -> bool {
        matches!(self, Self::Dragging { .. } | Self::Resizing { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
