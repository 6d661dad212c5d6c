#![forbid(unsafe_code)]

//! Panel geometry, size constraints and the pure drag/resize math.
//!
//! Everything here is a total function: inputs are clamped, never rejected.
//! The controller in [`crate::controller`] sequences these functions into
//! gestures; keeping the math free-standing makes the properties directly
//! testable without a state machine in the way.

use dockpane_core::{Point, Rect, Size, Viewport};
use serde::{Deserialize, Serialize};

use crate::dock::DockMode;
use crate::handle::ResizeHandle;

/// Default panel width in pixels.
pub const PANEL_DEFAULT_WIDTH: f64 = 420.0;
/// Default panel height in pixels.
pub const PANEL_DEFAULT_HEIGHT: f64 = 600.0;
/// Smallest width a resize can produce.
pub const PANEL_MIN_WIDTH: f64 = 320.0;
/// Smallest height a resize can produce.
pub const PANEL_MIN_HEIGHT: f64 = 400.0;
/// Largest width as a fraction of the viewport width.
pub const PANEL_MAX_WIDTH_RATIO: f64 = 0.8;
/// Largest height as a fraction of the viewport height.
pub const PANEL_MAX_HEIGHT_RATIO: f64 = 0.9;
/// Distance from a viewport edge within which a dragged panel snaps flush.
pub const PANEL_SNAP_THRESHOLD: f64 = 20.0;
/// Gap between the default floating placement and the bottom-right corner.
pub const PANEL_DEFAULT_MARGIN: f64 = 24.0;

/// Position, size and dock mode of the panel.
///
/// `position` is the floating top-left corner; `None` means "never placed,
/// use the default placement". Docked modes keep `position` untouched so
/// returning to `Floating` restores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub position: Option<Point>,
    pub size: Size,
    pub dock_mode: DockMode,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            position: None,
            size: Size::new(PANEL_DEFAULT_WIDTH, PANEL_DEFAULT_HEIGHT),
            dock_mode: DockMode::Floating,
        }
    }
}

impl PanelGeometry {
    /// Geometry with an explicit floating position.
    #[must_use]
    pub const fn floating(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size,
            dock_mode: DockMode::Floating,
        }
    }
}

/// Size limits and snapping tuning for the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelConstraints {
    pub min_width: f64,
    pub min_height: f64,
    pub max_width_ratio: f64,
    pub max_height_ratio: f64,
    pub snap_threshold: f64,
    pub default_size: Size,
    pub default_margin: f64,
}

impl Default for PanelConstraints {
    fn default() -> Self {
        Self {
            min_width: PANEL_MIN_WIDTH,
            min_height: PANEL_MIN_HEIGHT,
            max_width_ratio: PANEL_MAX_WIDTH_RATIO,
            max_height_ratio: PANEL_MAX_HEIGHT_RATIO,
            snap_threshold: PANEL_SNAP_THRESHOLD,
            default_size: Size::new(PANEL_DEFAULT_WIDTH, PANEL_DEFAULT_HEIGHT),
            default_margin: PANEL_DEFAULT_MARGIN,
        }
    }
}

impl PanelConstraints {
    /// Largest size a resize may produce in this viewport.
    #[must_use]
    pub fn max_size(&self, viewport: Viewport) -> Size {
        Size::new(
            viewport.width * self.max_width_ratio,
            viewport.height * self.max_height_ratio,
        )
    }

    /// Clamp a size into `[min, max]` per axis. When the viewport is so small
    /// that `max < min`, the minimum wins.
    #[must_use]
    pub fn clamp_size(&self, size: Size, viewport: Viewport) -> Size {
        let max = self.max_size(viewport);
        Size::new(
            clamp_min_wins(size.width, self.min_width, max.width),
            clamp_min_wins(size.height, self.min_height, max.height),
        )
    }

    /// Top-left corner of a panel that was never placed: anchored to the
    /// bottom-right corner with `default_margin`, clamped to the viewport.
    #[must_use]
    pub fn default_position(&self, size: Size, viewport: Viewport) -> Point {
        let candidate = Point::new(
            viewport.width - size.width - self.default_margin,
            viewport.height - size.height - self.default_margin,
        );
        clamp_to_viewport(candidate, size, viewport)
    }
}

// `f64::clamp` panics when min > max; a tiny viewport makes that reachable.
fn clamp_min_wins(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// Clamp a top-left corner so a box of `size` stays inside the viewport.
#[must_use]
pub fn clamp_to_viewport(candidate: Point, size: Size, viewport: Viewport) -> Point {
    let max = viewport.max_origin(size);
    Point::new(
        candidate.x.min(max.x).max(0.0),
        candidate.y.min(max.y).max(0.0),
    )
}

/// Snap an already-clamped corner flush to a viewport edge when it lies
/// within `threshold` of it.
///
/// The far-edge check runs last, so in a viewport narrower than twice the
/// threshold the far edge wins.
#[must_use]
pub fn snap_to_edges(position: Point, size: Size, viewport: Viewport, threshold: f64) -> Point {
    let max = viewport.max_origin(size);
    Point::new(
        snap_axis(position.x, max.x, threshold),
        snap_axis(position.y, max.y, threshold),
    )
}

fn snap_axis(value: f64, max: f64, threshold: f64) -> f64 {
    let mut out = value;
    if out < threshold {
        out = 0.0;
    }
    if out > max - threshold {
        out = max;
    }
    out
}

/// Pull an unreachable corner back into the viewport.
///
/// An axis is clamped only when the corner lies outside `[0, extent)` on it,
/// i.e. the header cannot be grabbed there. A corner already on screen is
/// returned unchanged even if the panel overhangs the far edge.
#[must_use]
pub fn pull_into_viewport(position: Point, size: Size, viewport: Viewport) -> Point {
    let clamped = clamp_to_viewport(position, size, viewport);
    let off_x = !(0.0..viewport.width).contains(&position.x);
    let off_y = !(0.0..viewport.height).contains(&position.y);
    Point::new(
        if off_x { clamped.x } else { position.x },
        if off_y { clamped.y } else { position.y },
    )
}

/// New top-left corner for a drag: `pointer - offset`, clamped, then snapped.
#[must_use]
pub fn drag_position(
    pointer: Point,
    offset: Point,
    size: Size,
    viewport: Viewport,
    constraints: &PanelConstraints,
) -> Point {
    let clamped = clamp_to_viewport(pointer - offset, size, viewport);
    snap_to_edges(clamped, size, viewport, constraints.snap_threshold)
}

/// New rectangle for a resize gesture.
///
/// `delta` is the total pointer travel since pointer-down. The moving edge
/// may not cross the viewport edge it travels toward, then width and height
/// are clamped to the size limits (minimum still wins); handles on the
/// left/top edge shift the origin by the *clamped* size change so the
/// opposite edge never drifts.
#[must_use]
pub fn resize_rect(
    handle: ResizeHandle,
    start: Rect,
    delta: Point,
    viewport: Viewport,
    constraints: &PanelConstraints,
) -> Rect {
    let edges = handle.edges();
    let mut raw = Size::new(
        start.width + f64::from(edges.width_sign) * delta.x,
        start.height + f64::from(edges.height_sign) * delta.y,
    );
    if edges.width_sign != 0 {
        let room = if edges.moves_left {
            start.right()
        } else {
            viewport.width - start.x
        };
        // A panel that already overhangs keeps its size.
        raw.width = raw.width.min(room.max(start.width));
    }
    if edges.height_sign != 0 {
        let room = if edges.moves_top {
            start.bottom()
        } else {
            viewport.height - start.y
        };
        raw.height = raw.height.min(room.max(start.height));
    }
    let size = constraints.clamp_size(raw, viewport);

    let x = if edges.moves_left {
        start.x + (start.width - size.width)
    } else {
        start.x
    };
    let y = if edges.moves_top {
        start.y + (start.height - size.height)
    } else {
        start.y
    };
    Rect::new(x, y, size.width, size.height)
}

/// On-screen rectangle of the panel for a geometry in a viewport.
#[must_use]
pub fn panel_rect(
    geometry: &PanelGeometry,
    viewport: Viewport,
    constraints: &PanelConstraints,
) -> Rect {
    if let Some(rect) = geometry.dock_mode.docked_rect(geometry.size, viewport) {
        return rect;
    }
    let origin = geometry
        .position
        .unwrap_or_else(|| constraints.default_position(geometry.size, viewport));
    Rect::from_origin_size(origin, geometry.size)
}
