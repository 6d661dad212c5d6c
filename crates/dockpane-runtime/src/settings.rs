#![forbid(unsafe_code)]

//! The persisted panel settings record.
//!
//! One flat camelCase JSON object under a fixed key, overwritten in full on
//! every persist. Loading merges stored fields over the defaults, so records
//! written by older builds (or missing fields) still load.

use dockpane_core::{Point, Size};
use dockpane_layout::{DockMode, PANEL_DEFAULT_HEIGHT, PANEL_DEFAULT_WIDTH, PanelGeometry};
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the host color scheme.
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    /// Whether the panel renders dark, given the host's preference.
    #[must_use]
    pub const fn is_dark(self, host_prefers_dark: bool) -> bool {
        match self {
            Self::Auto => host_prefers_dark,
            Self::Light => false,
            Self::Dark => true,
        }
    }
}

/// Body text size preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Stored floating position; `{x: null, y: null}` means never placed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredPosition {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl StoredPosition {
    /// The position as a point. A half-set or non-finite pair counts as unset.
    #[must_use]
    pub fn to_point(self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

impl From<Option<Point>> for StoredPosition {
    fn from(point: Option<Point>) -> Self {
        match point {
            Some(p) => Self {
                x: Some(p.x),
                y: Some(p.y),
            },
            None => Self::default(),
        }
    }
}

/// Everything the panel persists between page loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelSettings {
    pub enabled: bool,
    pub theme: Theme,
    pub position: StoredPosition,
    pub size: Size,
    pub dock_mode: DockMode,
    pub compact_mode: bool,
    pub auto_save: bool,
    pub sound_enabled: bool,
    pub font_size: FontSize,
    pub high_contrast: bool,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: Theme::Auto,
            position: StoredPosition::default(),
            size: Size::new(PANEL_DEFAULT_WIDTH, PANEL_DEFAULT_HEIGHT),
            dock_mode: DockMode::Floating,
            compact_mode: false,
            auto_save: true,
            sound_enabled: false,
            font_size: FontSize::Medium,
            high_contrast: false,
        }
    }
}

impl PanelSettings {
    /// Defaults with a different initial panel size.
    #[must_use]
    pub fn with_default_size(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Geometry part of the record.
    #[must_use]
    pub fn geometry(&self) -> PanelGeometry {
        PanelGeometry {
            position: self.position.to_point(),
            size: self.size,
            dock_mode: self.dock_mode,
        }
    }

    /// Overwrite the geometry part, leaving preferences untouched.
    pub fn set_geometry(&mut self, geometry: &PanelGeometry) {
        self.position = StoredPosition::from(geometry.position);
        self.size = geometry.size;
        self.dock_mode = geometry.dock_mode;
    }

    /// Parse a stored record, rejecting sizes no panel could have.
    pub fn from_json(json: &str) -> StorageResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| StorageError::Serialization(format!("invalid settings record: {e}")))?;
        if !settings.size.is_finite_positive() {
            return Err(StorageError::Corruption(format!(
                "settings size {}x{} is not a positive finite size",
                settings.size.width, settings.size.height
            )));
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> StorageResult<String> {
        serde_json::to_string(self)
            .map_err(|e| StorageError::Serialization(format!("failed to encode settings: {e}")))
    }

    /// Read the record under `key`, falling back to `defaults` when it is
    /// missing, unreadable or malformed. Failures are logged, never returned.
    pub fn load_or(store: &dyn KeyValueStore, key: &str, defaults: Self) -> Self {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return defaults,
            Err(err) => {
                tracing::warn!(
                    target: "dockpane::session",
                    store = store.name(),
                    key,
                    error = %err,
                    "panel settings unreadable, using defaults"
                );
                return defaults;
            }
        };
        match Self::from_json(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    target: "dockpane::session",
                    store = store.name(),
                    key,
                    error = %err,
                    "panel settings malformed, using defaults"
                );
                defaults
            }
        }
    }

    /// Overwrite the record under `key`.
    pub fn save(&self, store: &dyn KeyValueStore, key: &str) -> StorageResult<()> {
        store.set(key, &self.to_json()?)
    }
}
