//! Error types for board set-up and settings handling.
//!
//! Gesture handling itself never fails: malformed events are ignored and
//! actions on missing layers are no-ops. Only construction and configuration
//! paths return these errors.

use crate::types::LayerId;
use thiserror::Error;

/// Errors raised while building a layer collection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Two seeded layers share an id
    #[error("duplicate layer id: {0}")]
    DuplicateLayerId(LayerId),
}

/// Errors that can occur while loading, saving or watching settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of its accepted range
    #[error("Invalid setting: {0}")]
    Invalid(String),

    /// Seed layers contain a duplicated id
    #[error("Invalid seed layers: {0}")]
    Board(#[from] BoardError),

    /// File watcher could not be created
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Atomic rename of the temporary settings file failed
    #[error("Persist error: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// No platform config directory is available
    #[error("No config directory available")]
    NoConfigDir,
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
