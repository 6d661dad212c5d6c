#![forbid(unsafe_code)]

//! Panel tuning as data.
//!
//! [`PanelConfig`] carries every tunable the panel uses (size limits, snap
//! distance, default placement, storage key) and loads from TOML or JSON.
//! Missing fields take the built-in defaults, so an empty document is a
//! valid config.
//!
//! ```toml
//! # dockpane.toml
//! min_width = 360
//! snap_threshold = 12
//! storage_key = "docs_panel"
//! ```
//!
//! ```rust,ignore
//! let config = PanelConfig::from_toml_file("dockpane.toml")?;
//! let config = PanelConfig::from_json_str(json)?;
//! ```

use std::path::Path;

use dockpane_core::Size;
use dockpane_layout::{
    PANEL_DEFAULT_HEIGHT, PANEL_DEFAULT_MARGIN, PANEL_DEFAULT_WIDTH, PANEL_MAX_HEIGHT_RATIO,
    PANEL_MAX_WIDTH_RATIO, PANEL_MIN_HEIGHT, PANEL_MIN_WIDTH, PANEL_SNAP_THRESHOLD,
    PanelConstraints,
};
use serde::{Deserialize, Serialize};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "panel_settings";

/// Panel configuration. Every field defaults to the built-in constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub min_width: f64,
    pub min_height: f64,
    /// Largest width as a fraction of the viewport width, in `(0, 1]`.
    pub max_width_ratio: f64,
    /// Largest height as a fraction of the viewport height, in `(0, 1]`.
    pub max_height_ratio: f64,
    pub snap_threshold: f64,
    pub default_width: f64,
    pub default_height: f64,
    /// Gap between the default placement and the bottom-right corner.
    pub default_margin: f64,
    /// Key of the settings record in the store.
    pub storage_key: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_width: PANEL_MIN_WIDTH,
            min_height: PANEL_MIN_HEIGHT,
            max_width_ratio: PANEL_MAX_WIDTH_RATIO,
            max_height_ratio: PANEL_MAX_HEIGHT_RATIO,
            snap_threshold: PANEL_SNAP_THRESHOLD,
            default_width: PANEL_DEFAULT_WIDTH,
            default_height: PANEL_DEFAULT_HEIGHT,
            default_margin: PANEL_DEFAULT_MARGIN,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

impl PanelConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check every field. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("default_width", self.default_width),
            ("default_height", self.default_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be > 0, got {value}"));
            }
        }

        for (name, value) in [
            ("max_width_ratio", self.max_width_ratio),
            ("max_height_ratio", self.max_height_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                errors.push(format!("{name} must be in (0, 1], got {value}"));
            }
        }

        if !self.snap_threshold.is_finite() || self.snap_threshold < 0.0 {
            errors.push(format!(
                "snap_threshold must be >= 0, got {}",
                self.snap_threshold
            ));
        }
        if !self.default_margin.is_finite() || self.default_margin < 0.0 {
            errors.push(format!(
                "default_margin must be >= 0, got {}",
                self.default_margin
            ));
        }

        if self.default_width < self.min_width {
            errors.push(format!(
                "default_width {} is below min_width {}",
                self.default_width, self.min_width
            ));
        }
        if self.default_height < self.min_height {
            errors.push(format!(
                "default_height {} is below min_height {}",
                self.default_height, self.min_height
            ));
        }

        if self.storage_key.trim().is_empty() {
            errors.push("storage_key must not be empty".into());
        }

        errors
    }

    /// Fail with [`ConfigError::Validation`] unless [`validate`](Self::validate) is clean.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Layout constraints for the controller.
    #[must_use]
    pub fn constraints(&self) -> PanelConstraints {
        PanelConstraints {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width_ratio: self.max_width_ratio,
            max_height_ratio: self.max_height_ratio,
            snap_threshold: self.snap_threshold,
            default_size: self.default_size(),
            default_margin: self.default_margin,
        }
    }
}

/// Errors from loading or validating a [`PanelConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
