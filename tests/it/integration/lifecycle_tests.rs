//! Listener lifecycle: binding on construction, teardown, late additions.

use crate::helpers::{TestBoardBuilder, assert_position, finger, layer, mouse, mouse_drag};
use layerboard::input::{DeviceCapabilities, DeviceKind, ElementId, EventKind};
use layerboard::error::SettingsError;
use layerboard::settings::{DevicePreference, EditorSettings};
use layerboard::{Editor, Layer};

/// Three elements per layer, three event kinds each
const LISTENERS_PER_LAYER: usize = 9;

#[test]
fn test_editor_binds_every_element() {
    let editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .with_layer(2, (200.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Pointer);

    assert_eq!(editor.surface().listener_count(), 2 * LISTENERS_PER_LAYER);
    for element in [
        ElementId::Layer(2),
        ElementId::ResizeHandle(2),
        ElementId::RotateHandle(2),
    ] {
        assert_eq!(editor.surface().listeners_on(element), 3);
    }
    assert_eq!(editor.surface().listeners_on(ElementId::Canvas), 0);
}

#[test]
fn test_teardown_removes_listeners_and_ignores_events() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Pointer);

    editor.teardown();
    assert_eq!(editor.surface().listener_count(), 0);

    mouse_drag(&mut editor, ElementId::Layer(1), (10.0, 10.0), &[(40.0, 40.0)]);
    assert_position(&layer(editor.layers(), 1), 0.0, 0.0);

    // Idempotent
    editor.teardown();
    assert_eq!(editor.surface().listener_count(), 0);
}

#[test]
fn test_teardown_mid_gesture_ends_it() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Touch);

    editor.handle_event(finger(EventKind::Start, ElementId::Layer(1), 10.0, 10.0));
    editor.handle_event(finger(EventKind::Move, ElementId::Layer(1), 20.0, 10.0));
    assert!(editor.state().snapshot().is_tracking(1));

    editor.teardown();
    assert!(editor.interaction().is_idle());
    assert!(editor.state().snapshot().is_empty());
    // The applied part of the gesture stays
    assert_position(&layer(editor.layers(), 1), 10.0, 0.0);

    assert!(!editor.handle_event(finger(
        EventKind::Move,
        ElementId::Layer(1),
        90.0,
        90.0
    )));
}

#[test]
fn test_add_layer_binds_new_elements() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Pointer);

    assert!(editor.add_layer(Layer::new(2, (300.0, 300.0), (50.0, 50.0))));
    assert_eq!(editor.surface().listener_count(), 2 * LISTENERS_PER_LAYER);

    mouse_drag(&mut editor, ElementId::ResizeHandle(2), (350.0, 350.0), &[(360.0, 355.0)]);
    let added = layer(editor.layers(), 2);
    assert_eq!((added.width, added.height), (60.0, 55.0));
}

#[test]
fn test_add_layer_after_teardown_is_rejected() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Pointer);

    editor.teardown();
    assert!(editor.is_torn_down());
    assert!(!editor.add_layer(Layer::new(2, (300.0, 300.0), (50.0, 50.0))));
    assert_eq!(editor.surface().listener_count(), 0);
    assert_eq!(editor.layers().len(), 1);

    // A drag on the rejected layer must not move the existing one
    mouse_drag(&mut editor, ElementId::Layer(2), (310.0, 310.0), &[(340.0, 340.0)]);
    assert_position(&layer(editor.layers(), 1), 0.0, 0.0);
    assert!(editor.state().snapshot().is_empty());
    assert!(editor.perf().get_operation_stats("moved").is_none());
}

#[test]
fn test_add_layer_with_taken_id_is_rejected() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Pointer);

    assert!(!editor.add_layer(Layer::new(1, (500.0, 500.0), (10.0, 10.0))));
    assert_eq!(editor.layers().len(), 1);
    assert_eq!(editor.surface().listener_count(), LISTENERS_PER_LAYER);
    assert_position(&layer(editor.layers(), 1), 0.0, 0.0);
}

#[test]
fn test_new_editor_from_settings() {
    let settings = EditorSettings {
        device: DevicePreference::Auto,
        ..EditorSettings::default()
    };
    let mut editor = Editor::new(&settings, &DeviceCapabilities::touch()).unwrap();
    assert_eq!(editor.device(), DeviceKind::Touch);
    assert_eq!(editor.layers().len(), 1);

    // Default seed layer sits at (100, 100)
    editor.handle_event(finger(EventKind::Start, ElementId::Layer(1), 150.0, 150.0));
    editor.handle_event(finger(EventKind::Move, ElementId::Layer(1), 160.0, 140.0));
    assert_position(&layer(editor.layers(), 1), 110.0, 90.0);
}

#[test]
fn test_new_editor_rejects_duplicate_seed_ids() {
    let settings = EditorSettings {
        seed_layers: vec![
            Layer::new(1, (0.0, 0.0), (10.0, 10.0)),
            Layer::new(1, (20.0, 0.0), (10.0, 10.0)),
        ],
        ..EditorSettings::default()
    };
    assert!(matches!(
        Editor::new(&settings, &DeviceCapabilities::pointer()),
        Err(SettingsError::Board(_))
    ));
}

#[test]
fn test_new_editor_rejects_zero_zoom() {
    let settings = EditorSettings {
        zoom: 0.0,
        ..EditorSettings::default()
    };
    assert!(matches!(
        Editor::new(&settings, &DeviceCapabilities::pointer()),
        Err(SettingsError::Invalid(_))
    ));

    let nan_offset = EditorSettings {
        rotate_handle_offset: f32::NAN,
        ..EditorSettings::default()
    };
    assert!(Editor::new(&nan_offset, &DeviceCapabilities::pointer()).is_err());
}

#[test]
fn test_apply_invalid_settings_keeps_current_frame() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .with_zoom(2.0)
        .build_editor(DeviceKind::Pointer);

    let settings = EditorSettings {
        zoom: 0.0,
        ..EditorSettings::default()
    };
    assert!(matches!(editor.apply_settings(&settings), Err(SettingsError::Invalid(_))));
    assert_eq!(editor.frame().zoom, 2.0);

    // Geometry stays finite after the rejected change
    mouse_drag(&mut editor, ElementId::Layer(1), (40.0, 40.0), &[(60.0, 50.0)]);
    assert_position(&layer(editor.layers(), 1), 10.0, 5.0);
}

#[test]
fn test_apply_settings_changes_zoom_not_layers() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Pointer);
    let before = editor.layers().clone();

    let settings = EditorSettings {
        zoom: 4.0,
        ..EditorSettings::default()
    };
    editor.apply_settings(&settings).unwrap();
    assert!(editor.layers().same_as(&before));
    assert_eq!(editor.frame().zoom, 4.0);

    editor.handle_event(mouse(EventKind::Start, ElementId::Layer(1), 40.0, 40.0));
    editor.handle_event(mouse(EventKind::Move, ElementId::Layer(1), 80.0, 20.0));
    assert_position(&layer(editor.layers(), 1), 10.0, -5.0);
}

#[test]
fn test_perf_monitor_counts_dispatches() {
    let mut editor = TestBoardBuilder::new()
        .with_layer(1, (0.0, 0.0), (100.0, 100.0))
        .build_editor(DeviceKind::Pointer);
    mouse_drag(&mut editor, ElementId::Layer(1), (10.0, 10.0), &[(20.0, 20.0), (30.0, 30.0)]);

    let perf = editor.perf();
    assert_eq!(perf.total_dispatches(), 4);
    assert_eq!(perf.get_operation_stats("moved").map(|s| s.count()), Some(2));
    assert_eq!(perf.get_operation_stats("move_started").map(|s| s.count()), Some(1));
    assert_eq!(perf.get_operation_stats("move_ended").map(|s| s.count()), Some(1));
}
