#![forbid(unsafe_code)]

//! Resize handles and pointer hit targets.

use serde::{Deserialize, Serialize};

/// One of the eight resize handles around the panel border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    E,
    S,
    W,
    NE,
    SE,
    SW,
    NW,
}

/// How a pointer delta on a handle maps onto the panel rectangle.
///
/// `width_sign`/`height_sign` multiply the pointer delta into a size change.
/// `moves_left`/`moves_top` mark handles on the left/top edge: those keep the
/// opposite edge fixed by shifting the origin by the size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleEdges {
    pub width_sign: i8,
    pub height_sign: i8,
    pub moves_left: bool,
    pub moves_top: bool,
}

impl HandleEdges {
    const fn new(width_sign: i8, height_sign: i8, moves_left: bool, moves_top: bool) -> Self {
        Self {
            width_sign,
            height_sign,
            moves_left,
            moves_top,
        }
    }
}

impl ResizeHandle {
    /// All handles in border order.
    pub const ALL: [ResizeHandle; 8] = [
        Self::N,
        Self::E,
        Self::S,
        Self::W,
        Self::NE,
        Self::SE,
        Self::SW,
        Self::NW,
    ];

    /// Edge table for this handle.
    #[must_use]
    pub const fn edges(self) -> HandleEdges {
        match self {
            Self::N => HandleEdges::new(0, -1, false, true),
            Self::E => HandleEdges::new(1, 0, false, false),
            Self::S => HandleEdges::new(0, 1, false, false),
            Self::W => HandleEdges::new(-1, 0, true, false),
            Self::NE => HandleEdges::new(1, -1, false, true),
            Self::SE => HandleEdges::new(1, 1, false, false),
            Self::SW => HandleEdges::new(-1, 1, true, false),
            Self::NW => HandleEdges::new(-1, -1, true, true),
        }
    }

    /// Direction token used by handle markup (`data-direction="se"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::E => "e",
            Self::S => "s",
            Self::W => "w",
            Self::NE => "ne",
            Self::SE => "se",
            Self::SW => "sw",
            Self::NW => "nw",
        }
    }

    /// Parse a direction token. Case-insensitive; unknown tokens yield `None`.
    #[must_use]
    pub fn from_direction(token: &str) -> Option<Self> {
        let handle = match token.to_ascii_lowercase().as_str() {
            "n" => Self::N,
            "e" => Self::E,
            "s" => Self::S,
            "w" => Self::W,
            "ne" => Self::NE,
            "se" => Self::SE,
            "sw" => Self::SW,
            "nw" => Self::NW,
            _ => return None,
        };
        Some(handle)
    }
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "handle", rename_all = "snake_case")]
pub enum PanelHitTarget {
    /// The draggable header strip.
    Header,
    /// The action-button group inside the header; never starts a drag.
    HeaderActions,
    ResizeHandle(ResizeHandle),
    /// Anything else inside the panel.
    Body,
}
