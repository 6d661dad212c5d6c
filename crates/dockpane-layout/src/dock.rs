#![forbid(unsafe_code)]

//! Dock modes and docked rectangle derivation.

use dockpane_core::{Rect, Size, Viewport};
use serde::{Deserialize, Serialize};

/// Panel layout mode.
///
/// `Floating` keeps the user-controlled position and size. The docked modes
/// pin the panel to a full viewport edge; their rectangle is always derived
/// from the viewport and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockMode {
    #[default]
    Floating,
    Right,
    Left,
    Bottom,
}

impl DockMode {
    /// Fixed cycle order used by the dock button.
    pub const CYCLE: [DockMode; 4] = [Self::Floating, Self::Right, Self::Left, Self::Bottom];

    /// Next mode in the cycle `floating -> right -> left -> bottom -> floating`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Floating => Self::Right,
            Self::Right => Self::Left,
            Self::Left => Self::Bottom,
            Self::Bottom => Self::Floating,
        }
    }

    #[must_use]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Floating)
    }

    /// Stable lowercase name, identical to the persisted form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Floating => "floating",
            Self::Right => "right",
            Self::Left => "left",
            Self::Bottom => "bottom",
        }
    }

    /// Parse the persisted name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "floating" => Some(Self::Floating),
            "right" => Some(Self::Right),
            "left" => Some(Self::Left),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Material Symbols icon shown on the dock button for this mode.
    #[must_use]
    pub const fn icon_name(self) -> &'static str {
        match self {
            Self::Floating => "open_in_full",
            Self::Right => "dock_to_right",
            Self::Left => "dock_to_left",
            Self::Bottom => "dock_to_bottom",
        }
    }

    /// Whether a resize in this mode changes the stored width.
    #[must_use]
    pub const fn exposes_width(self) -> bool {
        !matches!(self, Self::Bottom)
    }

    /// Whether a resize in this mode changes the stored height.
    #[must_use]
    pub const fn exposes_height(self) -> bool {
        matches!(self, Self::Floating | Self::Bottom)
    }

    /// Rectangle of a docked panel, or `None` for `Floating`.
    ///
    /// Side docks span the full viewport height and keep the stored width;
    /// the bottom dock spans the full width and keeps the stored height.
    /// The kept dimension never exceeds the viewport.
    #[must_use]
    pub fn docked_rect(self, size: Size, viewport: Viewport) -> Option<Rect> {
        let width = size.width.min(viewport.width);
        let height = size.height.min(viewport.height);
        match self {
            Self::Floating => None,
            Self::Right => Some(Rect::new(
                viewport.width - width,
                0.0,
                width,
                viewport.height,
            )),
            Self::Left => Some(Rect::new(0.0, 0.0, width, viewport.height)),
            Self::Bottom => Some(Rect::new(
                0.0,
                viewport.height - height,
                viewport.width,
                height,
            )),
        }
    }
}

impl std::fmt::Display for DockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
