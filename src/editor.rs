//! Editor - routes raw events to gesture bindings and gestures to actions.
//!
//! ## Event flow
//!
//! ```text
//! RawPointerEvent -> propagation path (target, then ancestors)
//!                 -> GestureBinding of each element until propagation stops
//!                 -> GestureEvent -> InteractionState -> Action -> Engine
//! ```
//!
//! While a gesture runs, the element that started it captures every move and
//! end event, wherever the pointer is. A second start during a gesture is
//! ignored.
//!
//! ## Performance Notes
//!
//! Each call to [`Editor::handle_event`] is one dispatch in the
//! [`PerfMonitor`]; every reduced action is timed under its name.

use crate::engine::{Action, EditorState, Engine};
use crate::error::SettingsResult;
use crate::geometry::{point, rotation_angle};
use crate::hit_testing::HitTester;
use crate::input::coords::CanvasFrame;
use crate::input::{
    DeviceCapabilities, DeviceKind, ElementId, EventKind, GestureBinding, GestureEvent,
    InteractionState, ListenerHost, RawPointerEvent, Surface,
};
use crate::perf::{PerfMonitor, measure};
use crate::profile_scope;
use crate::settings::EditorSettings;
use crate::types::{Layer, LayerCollection, LayerId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Interactive canvas: layers, their bindings and the gesture in progress.
pub struct Editor {
    engine: Engine,
    surface: Arc<Surface>,
    bindings: HashMap<ElementId, GestureBinding>,
    device: DeviceKind,
    interaction: InteractionState,
    frame: CanvasFrame,
    hit_tester: HitTester,
    perf: PerfMonitor,
    torn_down: bool,
}

impl Editor {
    /// Seed layers from `settings` and bind every interactive element.
    ///
    /// Fails on settings that do not validate, duplicate seed ids included.
    pub fn new(settings: &EditorSettings, capabilities: &DeviceCapabilities) -> SettingsResult<Self> {
        let layers = settings.seed_collection()?;
        let device = settings.device.resolve(capabilities);
        Self::with_layers(layers, settings, device)
    }

    /// Editor over an existing collection with an explicit device variant.
    /// `settings` are validated in full, but the layers come from `layers`.
    pub fn with_layers(
        layers: LayerCollection,
        settings: &EditorSettings,
        device: DeviceKind,
    ) -> SettingsResult<Self> {
        settings.validate()?;
        let mut editor = Self {
            engine: Engine::new(layers),
            surface: Arc::new(Surface::new()),
            bindings: HashMap::new(),
            device,
            interaction: InteractionState::Idle,
            frame: settings.canvas_frame(),
            hit_tester: HitTester::new(settings.handle_geometry()),
            perf: PerfMonitor::new(),
            torn_down: false,
        };
        let ids: Vec<LayerId> = editor.engine.layers().ids().collect();
        for id in ids {
            editor.bind_layer(id);
        }
        debug!(layers = editor.engine.layers().len(), ?device, "Editor ready");
        Ok(editor)
    }

    fn bind_layer(&mut self, id: LayerId) {
        let host: Arc<dyn ListenerHost> = self.surface.clone();
        let device = self.device;
        for element in [
            ElementId::Layer(id),
            ElementId::ResizeHandle(id),
            ElementId::RotateHandle(id),
        ] {
            self.bindings
                .entry(element)
                .or_insert_with(|| GestureBinding::bind(host.clone(), element, device));
        }
    }

    /// Route one raw event. Returns true if the layer collection changed.
    pub fn handle_event(&mut self, mut event: RawPointerEvent) -> bool {
        profile_scope!("handle_event");
        self.perf.begin_dispatch();
        let changed = self.route(&mut event);
        self.perf.end_dispatch();
        changed
    }

    fn route(&mut self, event: &mut RawPointerEvent) -> bool {
        if self.torn_down {
            trace!(kind = ?event.kind, "Event after teardown ignored");
            return false;
        }
        let target = match (event.kind, self.interaction.captured_element()) {
            (EventKind::Start, Some(_)) => {
                debug!("Start during an active gesture ignored");
                return false;
            }
            (EventKind::Move | EventKind::End, Some(captured)) => captured,
            (_, None) => match event.target {
                Some(target) => target,
                None => {
                    trace!(kind = ?event.kind, "Event without target ignored");
                    return false;
                }
            },
        };

        let mut changed = false;
        for element in self.surface.propagation_path(target, event.kind) {
            event.current_target = Some(element);
            let gesture = self
                .bindings
                .get_mut(&element)
                .and_then(|binding| binding.handle(event));
            if let Some(gesture) = gesture {
                changed |= self.apply_gesture(element, gesture);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        changed
    }

    fn apply_gesture(&mut self, element: ElementId, gesture: GestureEvent) -> bool {
        match gesture {
            GestureEvent::Start { x, y } => {
                let Some(layer) = element.layer().and_then(|id| self.engine.layers().get(id)) else {
                    return false;
                };
                self.interaction = InteractionState::for_element(element, layer.center());
                debug!(?element, x, y, "Gesture started");
                if self.interaction.uses_snapshot() {
                    self.dispatch(Action::MoveStarted)
                } else {
                    false
                }
            }
            GestureEvent::Move { dx, dy, x, y } => match self.interaction {
                InteractionState::Idle => false,
                InteractionState::Dragging { .. } => {
                    let (dx, dy) = self.frame.delta_to_canvas(dx, dy);
                    self.dispatch(Action::Moved { dx, dy })
                }
                InteractionState::Resizing { .. } => {
                    let (dx, dy) = self.frame.delta_to_canvas(dx, dy);
                    self.dispatch(Action::Resized { dx, dy })
                }
                InteractionState::Rotating { layer, pivot } => {
                    let pointer = self.frame.client_to_canvas(point(x, y));
                    self.dispatch(Action::Rotated {
                        id: layer,
                        theta: rotation_angle(pivot, pointer),
                    })
                }
            },
            GestureEvent::End => {
                if !self.interaction.is_idle() {
                    debug!(?element, "Gesture ended");
                }
                self.interaction.reset();
                self.dispatch(Action::MoveEnded)
            }
        }
    }

    fn dispatch(&mut self, action: Action) -> bool {
        let (changed, elapsed_ms) = measure(|| self.engine.dispatch(action));
        self.perf.record_operation(action.name(), elapsed_ms);
        changed
    }

    /// Add a layer and bind its elements.
    ///
    /// Returns false if the id is taken or the editor was torn down.
    pub fn add_layer(&mut self, layer: Layer) -> bool {
        if self.torn_down {
            debug!(id = layer.id, "Layer added after teardown ignored");
            return false;
        }
        if !self.dispatch(Action::LayerAdded(layer)) {
            return false;
        }
        self.bind_layer(layer.id);
        true
    }

    /// Element under a client position, `None` for bare canvas.
    pub fn target_at(&mut self, x: f32, y: f32) -> Option<ElementId> {
        let p = self.frame.client_to_canvas(point(x, y));
        self.hit_tester.hit_test(self.engine.layers(), p)
    }

    /// Fill in a missing target by hit testing the event position.
    pub fn resolve_target(&mut self, mut event: RawPointerEvent) -> RawPointerEvent {
        if event.target.is_none() {
            let position = event.position();
            event.target = self.target_at(position.x, position.y);
        }
        event
    }

    /// Apply new frame and handle settings. Layers are left alone.
    ///
    /// Invalid settings are rejected and the current ones stay in effect.
    pub fn apply_settings(&mut self, settings: &EditorSettings) -> SettingsResult<()> {
        settings.validate()?;
        self.frame = settings.canvas_frame();
        self.hit_tester.set_handles(settings.handle_geometry());
        Ok(())
    }

    /// Remove every listener. The editor ignores events and new layers
    /// afterwards.
    ///
    /// A gesture cut short by teardown is ended, so no snapshot outlives it.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        for binding in self.bindings.values_mut() {
            binding.teardown();
        }
        if !self.interaction.is_idle() || self.engine.is_gesture_active() {
            self.interaction.reset();
            self.dispatch(Action::MoveEnded);
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn layers(&self) -> &LayerCollection {
        self.engine.layers()
    }

    pub fn state(&self) -> &EditorState {
        self.engine.state()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn device(&self) -> DeviceKind {
        self.device
    }

    pub fn frame(&self) -> &CanvasFrame {
        &self.frame
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }
}
