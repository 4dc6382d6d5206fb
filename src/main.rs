//! Replay a recorded pointer session against the editor.
//!
//! ```sh
//! layerboard-replay session.json [settings.json]
//! ```
//!
//! `session.json` holds an array of raw events. Events without a target are
//! hit-tested at their client position. The resulting layer geometry is logged
//! at info level; set `RUST_LOG=layerboard=trace` to follow every action.

use anyhow::{Context, Result, bail};
use layerboard::Editor;
use layerboard::input::{DeviceCapabilities, EventKind, RawPointerEvent};
use layerboard::settings::EditorSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(session_path) = args.next() else {
        bail!("usage: layerboard-replay <session.json> [settings.json]");
    };
    let settings = match args.next() {
        Some(path) => EditorSettings::load(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EditorSettings::load_or_default(),
    };

    let text = std::fs::read_to_string(&session_path)
        .with_context(|| format!("reading {}", session_path.display()))?;
    let events: Vec<RawPointerEvent> =
        serde_json::from_str(&text).context("parsing session events")?;

    // Touch sessions carry contact lists; decide the device from the recording
    let capabilities = if events.iter().any(|e| !e.touches.is_empty()) {
        DeviceCapabilities::touch()
    } else {
        DeviceCapabilities::pointer()
    };
    let mut editor = Editor::new(&settings, &capabilities).context("building editor")?;

    let mut changes = 0usize;
    for event in events {
        let event = if event.kind == EventKind::Start {
            editor.resolve_target(event)
        } else {
            event
        };
        if editor.handle_event(event) {
            changes += 1;
        }
    }

    tracing::info!(
        changes,
        dispatches = editor.perf().total_dispatches(),
        avg_dispatch_ms = format!("{:.3}", editor.perf().average_dispatch_time()),
        "Replay finished"
    );
    for layer in editor.layers() {
        tracing::info!(
            id = layer.id,
            x = layer.position_x,
            y = layer.position_y,
            width = layer.width,
            height = layer.height,
            rotate = layer.rotate,
            "Layer"
        );
    }
    editor.perf().log_summary_if_slow();
    editor.teardown();
    Ok(())
}
