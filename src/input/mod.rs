//! Pointer and touch input normalization.
//!
//! This module turns raw host events into a three-phase gesture protocol
//! (`Start`, `Move`, `End`) that is the same for touch screens and mice.
//!
//! ## Architecture
//!
//! Each interactive element gets its own [`GestureBinding`], which owns a
//! device-specific [`GestureNormalizer`] and the three listener subscriptions
//! that feed it. Dropping or tearing down the binding removes the
//! subscriptions. The editor keeps an explicit [`InteractionState`] so that
//! only one gesture runs at a time.
//!
//! ## Modules
//!
//! - `event` - Raw host events, element ids and the gesture protocol
//! - `normalizer` - Touch and pointer variants of the normalizer
//! - `binding` - Scoped listener registration and the in-memory host
//! - `state` - Interaction state machine
//! - `coords` - Client/canvas coordinate conversion

mod binding;
pub mod coords;
mod event;
mod normalizer;
mod state;

pub use binding::{GestureBinding, ListenerHost, ListenerId, Surface};
pub use event::{ContactPoint, ElementId, EventKind, GestureEvent, RawPointerEvent};
pub use normalizer::{
    DeviceCapabilities, DeviceKind, GestureNormalizer, PointerNormalizer, TouchNormalizer,
    normalizer_for,
};
pub use state::InteractionState;
