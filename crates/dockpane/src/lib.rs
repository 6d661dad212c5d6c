#![forbid(unsafe_code)]

//! Dockpane public facade crate.
//!
//! Re-exports the types a host needs to embed the panel and offers a small
//! prelude:
//!
//! ```rust,ignore
//! use dockpane::prelude::*;
//!
//! let config = dockpane::load_config("dockpane.toml")?;
//! let store = FileStore::default_for_app("docs");
//! let mut session = PanelSession::open(store, config, Viewport::new(1280.0, 800.0));
//! session.toggle();
//! ```

use std::fmt;
use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use dockpane_core::{
    KeyChord, KeyCode, Modifiers, PageVisibility, Point, PointerButton, Rect, Size, Viewport,
};

// --- Layout re-exports -----------------------------------------------------

pub use dockpane_layout::{
    CommitCause, DockMode, GestureKind, PanelConstraints, PanelController, PanelEffect,
    PanelGeometry, PanelHitTarget, PanelIgnoredReason, PanelTransition, ResizeHandle,
};

// --- Runtime re-exports ----------------------------------------------------

pub use dockpane_runtime::{
    ConfigError, FileStore, FontSize, KeyValueStore, MemoryStore, PanelConfig, PanelSession,
    PanelSettings, PanelShortcut, PanelVisibility, StorageError, Theme,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use dockpane_web::{
    HostInput, HostInputOutcome, InputParseError, PanelPointerAdapter, PanelPointerCaptureCommand,
    PanelPointerCaptureConfig, PanelPointerDispatch, apply_host_input, parse_host_input,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dockpane hosts.
#[derive(Debug)]
pub enum Error {
    /// Settings store failure.
    Storage(StorageError),
    /// Config could not be loaded or did not validate.
    Config(ConfigError),
    /// Host input JSON was malformed.
    #[cfg(feature = "web")]
    Input(InputParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage: {err}"),
            Self::Config(err) => write!(f, "config: {err}"),
            #[cfg(feature = "web")]
            Self::Input(err) => write!(f, "input: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Config(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Input(err) => Some(err),
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "web")]
impl From<InputParseError> for Error {
    fn from(err: InputParseError) -> Self {
        Self::Input(err)
    }
}

/// Standard result type for dockpane APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load and validate a config file. `.json` files are read as JSON,
/// everything else as TOML.
pub fn load_config(path: impl AsRef<Path>) -> Result<PanelConfig> {
    let path = path.as_ref();
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => PanelConfig::from_json_file(path)?,
        _ => PanelConfig::from_toml_file(path)?,
    };
    Ok(config.validated()?)
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DockMode, Error, FileStore, KeyValueStore, MemoryStore, PanelConfig, PanelGeometry,
        PanelHitTarget, PanelSession, PanelVisibility, Point, Result, Viewport,
    };

    #[cfg(feature = "web")]
    pub use crate::{PanelPointerAdapter, PanelPointerCaptureConfig};

    pub use crate::{core, layout, runtime};
    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use dockpane_core as core;
pub use dockpane_layout as layout;
pub use dockpane_runtime as runtime;
#[cfg(feature = "web")]
pub use dockpane_web as web;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_config_reads_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("dockpane.toml");
        std::fs::write(&toml_path, "snap_threshold = 8.0\n").unwrap();
        assert_eq!(load_config(&toml_path).unwrap().snap_threshold, 8.0);

        let json_path = dir.path().join("dockpane.json");
        std::fs::write(&json_path, r#"{"storage_key":"side_panel"}"#).unwrap();
        assert_eq!(load_config(&json_path).unwrap().storage_key, "side_panel");
    }

    #[test]
    fn load_config_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dockpane.toml");
        std::fs::write(&path, "max_width_ratio = 2.0\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Validation(_))));
        assert!(err.to_string().starts_with("config: validation errors"));
    }

    #[test]
    fn storage_errors_convert() {
        let err: Error = StorageError::Unavailable("quota".into()).into();
        assert!(matches!(err, Error::Storage(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "web")]
    #[test]
    fn input_errors_convert() {
        fn parse(json: &str) -> Result<Option<HostInput>> {
            Ok(parse_host_input(json)?)
        }
        assert!(matches!(parse("nope"), Err(Error::Input(_))));
        assert_eq!(parse(r#"{"kind":"blur"}"#).unwrap(), Some(HostInput::Blur));
    }

    #[test]
    fn prelude_opens_a_session() {
        use crate::prelude::*;
        let mut session = PanelSession::open(
            MemoryStore::new(),
            PanelConfig::default(),
            Viewport::new(1280.0, 800.0),
        );
        assert_eq!(session.toggle(), PanelVisibility::Open);
        assert_eq!(session.geometry().dock_mode, DockMode::Floating);
    }
}
