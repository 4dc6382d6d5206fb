//! Settings file watcher for hot-reload.
//!
//! Watches the settings file's directory (editors often replace files by
//! rename, which a watch on the file itself would miss) and reports changes to
//! that one file through a non-blocking [`SettingsWatcher::poll`].

use crate::error::SettingsResult;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use tracing::debug;

pub use crate::settings::default_settings_path;

/// Change to the watched settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<notify::Event>>,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    /// Start watching `path`. Its parent directory must exist.
    pub fn new(path: PathBuf) -> SettingsResult<Self> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching settings file");
        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next change to the settings file, if one is pending.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if !event.paths.iter().any(|p| p.file_name() == self.path.file_name()) {
                        continue;
                    }
                    let mapped = match event.kind {
                        EventKind::Modify(_) => SettingsEvent::Modified,
                        EventKind::Create(_) => SettingsEvent::Created,
                        EventKind::Remove(_) => SettingsEvent::Deleted,
                        _ => continue,
                    };
                    return Some(mapped);
                }
                Ok(Err(e)) => return Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }
}
