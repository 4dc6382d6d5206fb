//! Editor settings loaded from a JSON file.
//!
//! Every field has a default, so a partial (or empty) file is valid. Saving
//! writes to a temporary file next to the target and renames it into place,
//! so a crash never leaves a half-written settings file behind.

use crate::constants::{
    DEFAULT_LAYER_POSITION, DEFAULT_LAYER_SIZE, DEFAULT_ZOOM, HANDLE_HIT_MARGIN, HANDLE_SIZE,
    MAX_ZOOM, MIN_ZOOM, ROTATE_HANDLE_OFFSET, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::error::{SettingsError, SettingsResult};
use crate::geometry::{HandleGeometry, point};
use crate::input::coords::CanvasFrame;
use crate::input::{DeviceCapabilities, DeviceKind};
use crate::types::{Layer, LayerCollection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Which normalizer variant to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePreference {
    /// Ask the host's capabilities
    #[default]
    Auto,
    Touch,
    Pointer,
}

impl DevicePreference {
    /// Resolve against what the host reports.
    pub fn resolve(self, capabilities: &DeviceCapabilities) -> DeviceKind {
        match self {
            Self::Auto => capabilities.probe(),
            Self::Touch => DeviceKind::Touch,
            Self::Pointer => DeviceKind::Pointer,
        }
    }
}

/// User-tunable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Visual handle size in pixels
    pub handle_size: f32,
    /// Extra hit tolerance around handles
    pub handle_hit_margin: f32,
    /// Distance of the rotate handle from the layer's right edge
    pub rotate_handle_offset: f32,
    /// Client position of canvas (0, 0)
    pub canvas_origin: (f32, f32),
    pub zoom: f32,
    pub device: DevicePreference,
    /// Layers present at start-up
    pub seed_layers: Vec<Layer>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_size: HANDLE_SIZE,
            handle_hit_margin: HANDLE_HIT_MARGIN,
            rotate_handle_offset: ROTATE_HANDLE_OFFSET,
            canvas_origin: (0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            device: DevicePreference::Auto,
            seed_layers: vec![Layer::new(1, DEFAULT_LAYER_POSITION, DEFAULT_LAYER_SIZE)],
        }
    }
}

impl EditorSettings {
    /// Parse settings from JSON text and validate them.
    pub fn from_json(text: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from `path`.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        debug!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to `path` atomically.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(path)?;
        debug!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Write settings to the default location and return the path used.
    pub fn save_default(&self) -> SettingsResult<PathBuf> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> SettingsResult<()> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(SettingsError::Invalid(format!(
                "zoom {} outside {MIN_ZOOM}..={MAX_ZOOM}",
                self.zoom
            )));
        }
        if self.handle_size.is_nan() || self.handle_size <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "handle_size must be positive, got {}",
                self.handle_size
            )));
        }
        if self.handle_hit_margin.is_nan() || self.handle_hit_margin < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "handle_hit_margin must not be negative, got {}",
                self.handle_hit_margin
            )));
        }
        if !self.rotate_handle_offset.is_finite() {
            return Err(SettingsError::Invalid(format!(
                "rotate_handle_offset must be finite, got {}",
                self.rotate_handle_offset
            )));
        }
        let (ox, oy) = self.canvas_origin;
        if !(ox.is_finite() && oy.is_finite()) {
            return Err(SettingsError::Invalid(format!(
                "canvas_origin must be finite, got ({ox}, {oy})"
            )));
        }
        self.seed_collection()?;
        Ok(())
    }

    /// Seed layers as a collection.
    pub fn seed_collection(&self) -> SettingsResult<LayerCollection> {
        Ok(LayerCollection::new(self.seed_layers.iter().copied())?)
    }

    pub fn handle_geometry(&self) -> HandleGeometry {
        HandleGeometry {
            size: self.handle_size,
            hit_margin: self.handle_hit_margin,
            rotate_offset: self.rotate_handle_offset,
        }
    }

    pub fn canvas_frame(&self) -> CanvasFrame {
        CanvasFrame::new(point(self.canvas_origin.0, self.canvas_origin.1), self.zoom)
    }
}

/// `<config dir>/layerboard/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}
