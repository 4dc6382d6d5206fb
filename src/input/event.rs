//! Raw host events and the normalized gesture protocol.

use crate::geometry::{Point, point};
use crate::types::LayerId;
use serde::{Deserialize, Serialize};

/// An interactive element of the canvas.
///
/// Handles are children of their layer's element, layers are children of the
/// canvas. Events bubble in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Canvas,
    Layer(LayerId),
    ResizeHandle(LayerId),
    RotateHandle(LayerId),
}

impl ElementId {
    /// Layer this element belongs to, if any
    pub fn layer(&self) -> Option<LayerId> {
        match *self {
            Self::Canvas => None,
            Self::Layer(id) | Self::ResizeHandle(id) | Self::RotateHandle(id) => Some(id),
        }
    }

    /// Element events bubble to after this one
    pub fn parent(&self) -> Option<ElementId> {
        match *self {
            Self::Canvas => None,
            Self::Layer(_) => Some(Self::Canvas),
            Self::ResizeHandle(id) | Self::RotateHandle(id) => Some(Self::Layer(id)),
        }
    }
}

/// Phase of a raw event: touchstart/mousedown, touchmove/mousemove,
/// touchend/mouseup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Start,
    Move,
    End,
}

/// One simultaneous touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    pub client_x: f32,
    pub client_y: f32,
}

impl ContactPoint {
    pub fn position(&self) -> Point {
        point(self.client_x, self.client_y)
    }
}

/// A pointer or touch event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPointerEvent {
    pub kind: EventKind,
    #[serde(default)]
    pub client_x: f32,
    #[serde(default)]
    pub client_y: f32,
    #[serde(default)]
    pub target: Option<ElementId>,
    #[serde(default)]
    pub current_target: Option<ElementId>,
    /// Active contact points; empty for mouse events
    #[serde(default)]
    pub touches: Vec<ContactPoint>,
    #[serde(skip)]
    propagation_stopped: bool,
}

impl RawPointerEvent {
    /// Mouse-style event at a client position.
    pub fn pointer(kind: EventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            client_x: x,
            client_y: y,
            target: None,
            current_target: None,
            touches: Vec::new(),
            propagation_stopped: false,
        }
    }

    /// Touch event carrying the given contact points.
    pub fn touch(kind: EventKind, touches: &[(f32, f32)]) -> Self {
        let touches: Vec<ContactPoint> = touches
            .iter()
            .map(|&(client_x, client_y)| ContactPoint { client_x, client_y })
            .collect();
        let (client_x, client_y) = touches
            .first()
            .map(|t| (t.client_x, t.client_y))
            .unwrap_or_default();
        Self {
            kind,
            client_x,
            client_y,
            target: None,
            current_target: None,
            touches,
            propagation_stopped: false,
        }
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn position(&self) -> Point {
        point(self.client_x, self.client_y)
    }

    /// Keep the event from reaching ancestor listeners
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Both target references are present
    pub(crate) fn has_targets(&self) -> bool {
        self.target.is_some() && self.current_target.is_some()
    }
}

/// Device-independent gesture phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// First contact, absolute client position
    Start { x: f32, y: f32 },
    /// Cumulative offset from `Start` plus the absolute position
    Move { dx: f32, dy: f32, x: f32, y: f32 },
    /// Release
    End,
}
