#![forbid(unsafe_code)]

//! Gesture lifecycle state.
//!
//! ```text
//! Idle -> Dragging -> Idle   (commit on release or interruption)
//!    \--> Resizing -> Idle
//! ```
//!
//! A single enum carries the per-gesture snapshot, so "dragging and resizing
//! at once" cannot be represented.

use dockpane_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::handle::ResizeHandle;

/// Active pointer gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position minus panel top-left at pointer-down.
        offset: Point,
        last_pointer: Point,
    },
    Resizing {
        handle: ResizeHandle,
        start_pointer: Point,
        /// On-screen rectangle at pointer-down.
        start_rect: Rect,
        last_pointer: Point,
    },
}

impl GestureState {
    /// Kind of the active gesture, `None` when idle.
    #[must_use]
    pub const fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Dragging { .. } => Some(GestureKind::Drag),
            Self::Resizing { .. } => Some(GestureKind::Resize),
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Gesture discriminant for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Drag,
    Resize,
}

/// Why an active gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitCause {
    PointerUp,
    PointerCancel,
    /// Window blur or page hidden.
    FocusLost,
    CaptureLost,
    Programmatic,
}

/// Deterministic reason an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelIgnoredReason {
    /// Drag requested while the panel is docked.
    NotFloating,
    /// Pointer went down on a target that starts no gesture.
    NotDraggable,
    ActiveGestureInProgress,
    NoActiveGesture,
    NonFiniteCoordinate,
    /// `set_dock_mode` with the current mode.
    DockModeUnchanged,
    InvalidViewport,
}
