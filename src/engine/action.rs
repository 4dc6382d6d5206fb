//! Actions accepted by the reducer.

use crate::types::{Layer, LayerId};

/// Every state transition the engine knows about.
///
/// The reducer matches this enum exhaustively, so adding a variant is a
/// compile error until the transition is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A gesture began: snapshot every layer
    MoveStarted,
    /// Cumulative translation since gesture start
    Moved { dx: f32, dy: f32 },
    /// Cumulative size change since gesture start
    Resized { dx: f32, dy: f32 },
    /// The gesture ended: drop all snapshots
    MoveEnded,
    /// Absolute rotation of one layer, in radians
    Rotated { id: LayerId, theta: f32 },
    /// Append a layer. Ignored when the id is already taken.
    LayerAdded(Layer),
}

impl Action {
    /// Short name used in logs and dispatch statistics
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveStarted => "move_started",
            Self::Moved { .. } => "moved",
            Self::Resized { .. } => "resized",
            Self::MoveEnded => "move_ended",
            Self::Rotated { .. } => "rotated",
            Self::LayerAdded(_) => "layer_added",
        }
    }
}
