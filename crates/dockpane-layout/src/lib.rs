#![forbid(unsafe_code)]

//! Floating panel layout.
//!
//! # Role in dockpane
//! This crate owns everything about *where* the panel is: its
//! [`PanelGeometry`], the drag/resize math, the dock modes and the
//! [`PanelController`] state machine that sequences pointer gestures.
//!
//! # Invariants
//! - A floating panel moved by a drag always lies fully inside the viewport.
//! - Resizes never leave `[min, max]`; `max` is a viewport ratio and `min`
//!   wins when the viewport is too small.
//! - Resizing from a left/top handle keeps the opposite edge fixed.
//! - Docked rectangles are derived from the viewport; the floating position
//!   survives a full dock cycle unchanged.

pub mod controller;
pub mod dock;
pub mod geometry;
pub mod gesture;
pub mod handle;

pub use controller::{PanelController, PanelEffect, PanelTransition};
pub use dock::DockMode;
pub use geometry::{
    PANEL_DEFAULT_HEIGHT, PANEL_DEFAULT_MARGIN, PANEL_DEFAULT_WIDTH, PANEL_MAX_HEIGHT_RATIO,
    PANEL_MAX_WIDTH_RATIO, PANEL_MIN_HEIGHT, PANEL_MIN_WIDTH, PANEL_SNAP_THRESHOLD,
    PanelConstraints, PanelGeometry, clamp_to_viewport, drag_position, panel_rect,
    pull_into_viewport, resize_rect, snap_to_edges,
};
pub use gesture::{CommitCause, GestureKind, GestureState, PanelIgnoredReason};
pub use handle::{HandleEdges, PanelHitTarget, ResizeHandle};
