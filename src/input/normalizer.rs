//! Device normalizers - turn touch or mouse sequences into gestures.
//!
//! Both variants implement [`GestureNormalizer`]. The variant is picked once,
//! from [`DeviceCapabilities::probe`], and used uniformly afterwards.
//!
//! Handled events stop propagation so a handle nested inside a layer never
//! starts a second gesture on the layer. Ignored events keep bubbling.

use super::event::{EventKind, GestureEvent, RawPointerEvent};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::trace;

/// Pointing device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Touch,
    Pointer,
}

/// What the host reports about its input hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceCapabilities {
    /// Maximum simultaneous touch points (0 when touch is unsupported)
    pub max_touch_points: u32,
}

impl DeviceCapabilities {
    pub fn touch() -> Self {
        Self { max_touch_points: 5 }
    }

    pub fn pointer() -> Self {
        Self { max_touch_points: 0 }
    }

    /// Device family to normalize for
    pub fn probe(&self) -> DeviceKind {
        if self.max_touch_points > 0 {
            DeviceKind::Touch
        } else {
            DeviceKind::Pointer
        }
    }
}

/// Three-phase gesture capability shared by every device variant.
pub trait GestureNormalizer: Debug + Send {
    /// Begin a gesture. `None` when the event is not a single unambiguous drag.
    fn start(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent>;

    /// Continue the gesture. `None` when no gesture is active.
    fn drag(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent>;

    /// Finish the gesture. Always succeeds and always clears the start.
    fn end(&mut self, event: &mut RawPointerEvent) -> GestureEvent;

    /// Discard any recorded start without emitting an event.
    fn reset(&mut self);

    fn device(&self) -> DeviceKind;

    /// Route an event to the phase matching its kind.
    fn handle(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent> {
        match event.kind {
            EventKind::Start => self.start(event),
            EventKind::Move => self.drag(event),
            EventKind::End => Some(self.end(event)),
        }
    }
}

/// Start position of the active gesture, shared by both variants.
#[derive(Debug, Clone, Copy, Default)]
struct DragOrigin {
    initial: Option<Point>,
}

impl DragOrigin {
    fn begin(&mut self, at: Point, event: &mut RawPointerEvent) -> GestureEvent {
        event.stop_propagation();
        self.initial = Some(at);
        GestureEvent::Start { x: at.x, y: at.y }
    }

    fn follow(&self, at: Point, event: &mut RawPointerEvent) -> Option<GestureEvent> {
        let initial = self.initial?;
        event.stop_propagation();
        Some(GestureEvent::Move {
            dx: at.x - initial.x,
            dy: at.y - initial.y,
            x: at.x,
            y: at.y,
        })
    }

    fn finish(&mut self, event: &mut RawPointerEvent) -> GestureEvent {
        event.stop_propagation();
        self.initial = None;
        GestureEvent::End
    }
}

/// Touch variant: only single-contact events count as drags.
#[derive(Debug, Default)]
pub struct TouchNormalizer {
    origin: DragOrigin,
}

impl TouchNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single contact point, or `None` for zero or several contacts
    fn single_contact(event: &RawPointerEvent) -> Option<Point> {
        match event.touches.as_slice() {
            [only] => Some(only.position()),
            _ => None,
        }
    }
}

impl GestureNormalizer for TouchNormalizer {
    fn start(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent> {
        if !event.has_targets() {
            trace!("Touch start without target ignored");
            return None;
        }
        let Some(at) = Self::single_contact(event) else {
            trace!(contacts = event.touches.len(), "Multi-touch start ignored");
            return None;
        };
        Some(self.origin.begin(at, event))
    }

    fn drag(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent> {
        let at = Self::single_contact(event)?;
        self.origin.follow(at, event)
    }

    fn end(&mut self, event: &mut RawPointerEvent) -> GestureEvent {
        self.origin.finish(event)
    }

    fn reset(&mut self) {
        self.origin = DragOrigin::default();
    }

    fn device(&self) -> DeviceKind {
        DeviceKind::Touch
    }
}

/// Mouse/pointer variant: position comes straight from the event.
#[derive(Debug, Default)]
pub struct PointerNormalizer {
    origin: DragOrigin,
}

impl PointerNormalizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GestureNormalizer for PointerNormalizer {
    fn start(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent> {
        if !event.has_targets() {
            trace!("Pointer start without target ignored");
            return None;
        }
        let at = event.position();
        Some(self.origin.begin(at, event))
    }

    fn drag(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent> {
        let at = event.position();
        self.origin.follow(at, event)
    }

    fn end(&mut self, event: &mut RawPointerEvent) -> GestureEvent {
        self.origin.finish(event)
    }

    fn reset(&mut self) {
        self.origin = DragOrigin::default();
    }

    fn device(&self) -> DeviceKind {
        DeviceKind::Pointer
    }
}

/// Normalizer for a device family.
pub fn normalizer_for(kind: DeviceKind) -> Box<dyn GestureNormalizer> {
    match kind {
        DeviceKind::Touch => Box::new(TouchNormalizer::new()),
        DeviceKind::Pointer => Box::new(PointerNormalizer::new()),
    }
}
