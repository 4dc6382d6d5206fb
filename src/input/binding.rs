//! Scoped listener registration.
//!
//! A [`GestureBinding`] ties one normalizer to one element for its whole
//! lifetime. Binding subscribes start, move and end listeners on the
//! [`ListenerHost`]; [`GestureBinding::teardown`] (or dropping the binding)
//! removes all three. Teardown can be called any number of times.

use super::event::{ElementId, EventKind, GestureEvent, RawPointerEvent};
use super::normalizer::{DeviceKind, GestureNormalizer, normalizer_for};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

const ALL_KINDS: [EventKind; 3] = [EventKind::Start, EventKind::Move, EventKind::End];

/// Handle of one live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Whatever owns the element tree and dispatches events to listeners.
pub trait ListenerHost: Send + Sync {
    fn subscribe(&self, element: ElementId, kind: EventKind) -> ListenerId;
    fn unsubscribe(&self, listener: ListenerId);
}

/// A normalizer bound to one element.
pub struct GestureBinding {
    host: Arc<dyn ListenerHost>,
    element: ElementId,
    listeners: Vec<ListenerId>,
    normalizer: Box<dyn GestureNormalizer>,
}

impl fmt::Debug for GestureBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureBinding")
            .field("element", &self.element)
            .field("listeners", &self.listeners)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

impl GestureBinding {
    /// Subscribe all three event kinds on `element`.
    pub fn bind(host: Arc<dyn ListenerHost>, element: ElementId, device: DeviceKind) -> Self {
        let listeners = ALL_KINDS
            .iter()
            .map(|&kind| host.subscribe(element, kind))
            .collect();
        trace!(?element, ?device, "Bound gesture listeners");
        Self {
            host,
            element,
            listeners,
            normalizer: normalizer_for(device),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn device(&self) -> DeviceKind {
        self.normalizer.device()
    }

    pub fn is_bound(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Normalize an event delivered to this element.
    ///
    /// Returns `None` for ignored events and for every event after teardown.
    pub fn handle(&mut self, event: &mut RawPointerEvent) -> Option<GestureEvent> {
        if !self.is_bound() {
            return None;
        }
        self.normalizer.handle(event)
    }

    /// Unsubscribe every listener and forget any gesture in progress.
    pub fn teardown(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for listener in self.listeners.drain(..) {
            self.host.unsubscribe(listener);
        }
        self.normalizer.reset();
        debug!(element = ?self.element, "Gesture listeners removed");
    }
}

impl Drop for GestureBinding {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[derive(Debug, Default)]
struct SurfaceInner {
    listeners: HashMap<ListenerId, (ElementId, EventKind)>,
    next_listener: u64,
}

/// In-memory listener host over the canvas element tree.
///
/// The tree shape comes from [`ElementId::parent`]; the surface only tracks
/// which elements currently listen for which event kinds.
#[derive(Debug, Default)]
pub struct Surface {
    inner: Mutex<SurfaceInner>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bubbling order for an event of `kind` aimed at `target`: the target
    /// first, then its ancestors, keeping only elements that listen for `kind`.
    pub fn propagation_path(&self, target: ElementId, kind: EventKind) -> Vec<ElementId> {
        let inner = self.inner.lock();
        std::iter::successors(Some(target), ElementId::parent)
            .filter(|element| {
                inner
                    .listeners
                    .values()
                    .any(|&(listening, listened)| listening == *element && listened == kind)
            })
            .collect()
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Number of live subscriptions on one element
    pub fn listeners_on(&self, element: ElementId) -> usize {
        self.inner
            .lock()
            .listeners
            .values()
            .filter(|(listening, _)| *listening == element)
            .count()
    }
}

impl ListenerHost for Surface {
    fn subscribe(&self, element: ElementId, kind: EventKind) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.insert(id, (element, kind));
        id
    }

    fn unsubscribe(&self, listener: ListenerId) {
        self.inner.lock().listeners.remove(&listener);
    }
}
