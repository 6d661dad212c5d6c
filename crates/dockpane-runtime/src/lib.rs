#![forbid(unsafe_code)]

//! Runtime for the dockpane floating panel.
//!
//! # Role in dockpane
//! `dockpane-runtime` binds the layout controller to the outside world: it
//! loads and saves the [`PanelSettings`] record through a [`KeyValueStore`],
//! reads tuning from a [`PanelConfig`], and tracks open/closed/minimized
//! state and keyboard shortcuts in a [`PanelSession`].
//!
//! # Persistence contract
//! The record is written only at meaningful moments: gesture commit (release
//! or interruption), dock change, a viewport change that moved the panel,
//! settings edits, reset, and page hide. Live drag/resize updates are never
//! written.

pub mod config;
pub mod session;
pub mod settings;
pub mod storage;

pub use config::{ConfigError, DEFAULT_STORAGE_KEY, PanelConfig};
pub use session::{PanelSession, PanelShortcut, PanelVisibility};
pub use settings::{FontSize, PanelSettings, StoredPosition, Theme};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
