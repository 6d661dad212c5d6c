#![forbid(unsafe_code)]

//! Floating panel controller.
//!
//! [`PanelController`] owns a [`PanelGeometry`] and turns pointer gestures,
//! dock-mode changes and viewport resizes into new geometry. Every call
//! returns a [`PanelTransition`] describing what happened; callers decide
//! whether to persist by checking [`PanelTransition::requires_persist`].
//!
//! No operation fails: out-of-range input is clamped and meaningless input
//! (a move with no gesture, a drag while docked) produces an
//! [`PanelEffect::Ignored`] transition with a reason.

use dockpane_core::{Point, Rect, Viewport};
use serde::{Deserialize, Serialize};

use crate::dock::DockMode;
use crate::geometry::{
    PanelConstraints, PanelGeometry, drag_position, panel_rect, pull_into_viewport, resize_rect,
};
use crate::gesture::{CommitCause, GestureKind, GestureState, PanelIgnoredReason};
use crate::handle::{PanelHitTarget, ResizeHandle};

/// Effect emitted by one controller step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum PanelEffect {
    DragStarted {
        offset: Point,
        origin: Point,
    },
    /// Live drag update; position already applied.
    Moved {
        position: Point,
    },
    ResizeStarted {
        handle: ResizeHandle,
        start_rect: Rect,
    },
    /// Live resize update; `rect` is the new on-screen rectangle.
    Resized {
        handle: ResizeHandle,
        rect: Rect,
    },
    /// Gesture ended; `geometry` is what should be persisted.
    Committed {
        gesture: GestureKind,
        cause: CommitCause,
        geometry: PanelGeometry,
    },
    DockChanged {
        from: DockMode,
        to: DockMode,
        rect: Rect,
    },
    ViewportReconciled {
        viewport: Viewport,
        adjusted: bool,
    },
    Ignored {
        reason: PanelIgnoredReason,
    },
}

/// One controller transition with a monotonically increasing id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelTransition {
    pub transition_id: u64,
    pub from: GestureState,
    pub to: GestureState,
    pub effect: PanelEffect,
}

impl PanelTransition {
    /// Whether the geometry changed in a way that must be written back.
    ///
    /// Live drag/resize updates do not count; only their commit does.
    #[must_use]
    pub const fn requires_persist(&self) -> bool {
        matches!(
            self.effect,
            PanelEffect::Committed { .. }
                | PanelEffect::DockChanged { .. }
                | PanelEffect::ViewportReconciled { adjusted: true, .. }
        )
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.effect, PanelEffect::Ignored { .. })
    }

    /// Ignored reason, if this transition was a no-op.
    #[must_use]
    pub const fn ignored_reason(&self) -> Option<PanelIgnoredReason> {
        match self.effect {
            PanelEffect::Ignored { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Drag/resize/dock state machine for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelController {
    geometry: PanelGeometry,
    constraints: PanelConstraints,
    viewport: Viewport,
    /// Viewport the floating position was last validated against.
    floating_viewport: Viewport,
    gesture: GestureState,
    transition_counter: u64,
}

impl PanelController {
    /// Controller for restored (or default) geometry.
    ///
    /// A floating position whose corner is off screen is pulled back in;
    /// anything else is taken as-is.
    #[must_use]
    pub fn new(geometry: PanelGeometry, constraints: PanelConstraints, viewport: Viewport) -> Self {
        let mut controller = Self {
            geometry,
            constraints,
            viewport,
            floating_viewport: viewport,
            gesture: GestureState::Idle,
            transition_counter: 0,
        };
        controller.pull_floating_into_viewport();
        controller
    }

    #[must_use]
    pub const fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    #[must_use]
    pub const fn constraints(&self) -> &PanelConstraints {
        &self.constraints
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub const fn gesture(&self) -> GestureState {
        self.gesture
    }

    #[must_use]
    pub const fn dock_mode(&self) -> DockMode {
        self.geometry.dock_mode
    }

    /// Whether a drag or resize is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// Current on-screen rectangle.
    #[must_use]
    pub fn panel_rect(&self) -> Rect {
        panel_rect(&self.geometry, self.viewport, &self.constraints)
    }

    /// Replace the geometry wholesale (settings reset). Any active gesture is
    /// dropped without a commit.
    pub fn replace_geometry(&mut self, geometry: PanelGeometry) {
        self.geometry = geometry;
        self.gesture = GestureState::Idle;
        self.floating_viewport = self.viewport;
        self.pull_floating_into_viewport();
    }

    /// Pointer went down on `target` at `pointer`.
    pub fn pointer_down(&mut self, target: PanelHitTarget, pointer: Point) -> PanelTransition {
        if !pointer.is_finite() {
            return self.ignored(PanelIgnoredReason::NonFiniteCoordinate);
        }
        if self.is_active() {
            return self.ignored(PanelIgnoredReason::ActiveGestureInProgress);
        }

        match target {
            PanelHitTarget::Header => {
                if !self.geometry.dock_mode.is_floating() {
                    return self.ignored(PanelIgnoredReason::NotFloating);
                }
                let origin = self.panel_rect().origin();
                let offset = pointer - origin;
                tracing::debug!(
                    target: "dockpane::panel",
                    x = origin.x,
                    y = origin.y,
                    "drag started"
                );
                self.transition(
                    GestureState::Dragging {
                        offset,
                        last_pointer: pointer,
                    },
                    PanelEffect::DragStarted { offset, origin },
                )
            }
            PanelHitTarget::ResizeHandle(handle) => {
                let start_rect = self.panel_rect();
                tracing::debug!(
                    target: "dockpane::panel",
                    handle = handle.as_str(),
                    dock_mode = self.geometry.dock_mode.as_str(),
                    "resize started"
                );
                self.transition(
                    GestureState::Resizing {
                        handle,
                        start_pointer: pointer,
                        start_rect,
                        last_pointer: pointer,
                    },
                    PanelEffect::ResizeStarted { handle, start_rect },
                )
            }
            PanelHitTarget::HeaderActions | PanelHitTarget::Body => {
                self.ignored(PanelIgnoredReason::NotDraggable)
            }
        }
    }

    /// Pointer moved to `pointer`; applies the live gesture update.
    pub fn pointer_move(&mut self, pointer: Point) -> PanelTransition {
        if !pointer.is_finite() {
            return self.ignored(PanelIgnoredReason::NonFiniteCoordinate);
        }

        match self.gesture {
            GestureState::Idle => self.ignored(PanelIgnoredReason::NoActiveGesture),
            GestureState::Dragging { offset, .. } => {
                let position = drag_position(
                    pointer,
                    offset,
                    self.geometry.size,
                    self.viewport,
                    &self.constraints,
                );
                self.geometry.position = Some(position);
                self.transition(
                    GestureState::Dragging {
                        offset,
                        last_pointer: pointer,
                    },
                    PanelEffect::Moved { position },
                )
            }
            GestureState::Resizing {
                handle,
                start_pointer,
                start_rect,
                ..
            } => {
                let rect = resize_rect(
                    handle,
                    start_rect,
                    pointer - start_pointer,
                    self.viewport,
                    &self.constraints,
                );
                self.apply_resized_rect(rect);
                let rect = self.panel_rect();
                self.transition(
                    GestureState::Resizing {
                        handle,
                        start_pointer,
                        start_rect,
                        last_pointer: pointer,
                    },
                    PanelEffect::Resized { handle, rect },
                )
            }
        }
    }

    /// Pointer released; commits the active gesture.
    pub fn pointer_up(&mut self) -> PanelTransition {
        self.commit(CommitCause::PointerUp)
    }

    /// Gesture interrupted (pointer cancel, blur, hidden page, lost capture).
    ///
    /// The live geometry already applied is kept and committed like a release.
    pub fn cancel(&mut self, cause: CommitCause) -> PanelTransition {
        self.commit(cause)
    }

    /// Advance `floating -> right -> left -> bottom -> floating`.
    pub fn cycle_dock_mode(&mut self) -> PanelTransition {
        let next = self.geometry.dock_mode.next();
        self.set_dock_mode(next)
    }

    /// Switch directly to `mode`.
    ///
    /// Docking keeps the stored floating position; returning to `Floating`
    /// restores it (or the default placement when none was ever set).
    pub fn set_dock_mode(&mut self, mode: DockMode) -> PanelTransition {
        if self.is_active() {
            return self.ignored(PanelIgnoredReason::ActiveGestureInProgress);
        }
        let from = self.geometry.dock_mode;
        if from == mode {
            return self.ignored(PanelIgnoredReason::DockModeUnchanged);
        }

        self.geometry.dock_mode = mode;
        if mode.is_floating() {
            self.reconcile_floating_position();
        }
        let rect = self.panel_rect();
        tracing::debug!(
            target: "dockpane::panel",
            from = from.as_str(),
            to = mode.as_str(),
            "dock mode changed"
        );
        self.transition(self.gesture, PanelEffect::DockChanged { from, to: mode, rect })
    }

    /// Host window resized.
    ///
    /// When floating, each axis whose viewport dimension changed is
    /// re-clamped so the panel stays reachable; the position moves only as
    /// far as needed. Docked rectangles follow the viewport on their own.
    pub fn resize_viewport(&mut self, viewport: Viewport) -> PanelTransition {
        if !viewport.is_valid() {
            return self.ignored(PanelIgnoredReason::InvalidViewport);
        }
        self.viewport = viewport;
        let adjusted = if self.geometry.dock_mode.is_floating() {
            self.reconcile_floating_position()
        } else {
            false
        };
        if adjusted {
            tracing::debug!(
                target: "dockpane::panel",
                width = viewport.width,
                height = viewport.height,
                "panel position reconciled to viewport"
            );
        }
        self.transition(
            self.gesture,
            PanelEffect::ViewportReconciled { viewport, adjusted },
        )
    }

    fn commit(&mut self, cause: CommitCause) -> PanelTransition {
        let Some(gesture) = self.gesture.kind() else {
            return self.ignored(PanelIgnoredReason::NoActiveGesture);
        };
        let geometry = self.geometry;
        tracing::debug!(
            target: "dockpane::panel",
            ?gesture,
            ?cause,
            width = geometry.size.width,
            height = geometry.size.height,
            "gesture committed"
        );
        self.transition(
            GestureState::Idle,
            PanelEffect::Committed {
                gesture,
                cause,
                geometry,
            },
        )
    }

    fn apply_resized_rect(&mut self, rect: Rect) {
        let mode = self.geometry.dock_mode;
        if mode.exposes_width() {
            self.geometry.size.width = rect.width;
        }
        if mode.exposes_height() {
            self.geometry.size.height = rect.height;
        }
        if mode.is_floating() {
            // Materialize the origin: the default placement is anchored to the
            // bottom-right and would otherwise drift as the size changes.
            self.geometry.position = Some(rect.origin());
        }
    }

    fn pull_floating_into_viewport(&mut self) {
        if !self.geometry.dock_mode.is_floating() {
            return;
        }
        if let Some(position) = self.geometry.position {
            let pulled = pull_into_viewport(position, self.geometry.size, self.viewport);
            if pulled != position {
                tracing::debug!(
                    target: "dockpane::panel",
                    x = pulled.x,
                    y = pulled.y,
                    "restored panel pulled into viewport"
                );
                self.geometry.position = Some(pulled);
            }
        }
    }

    /// Re-clamp the stored floating position on axes whose viewport dimension
    /// differs from the last validated one, and on any axis where the corner
    /// is off screen. Returns whether it moved.
    fn reconcile_floating_position(&mut self) -> bool {
        let previous = self.floating_viewport;
        self.floating_viewport = self.viewport;
        let Some(position) = self.geometry.position else {
            return false;
        };

        let max = self.viewport.max_origin(self.geometry.size);
        let mut next = pull_into_viewport(position, self.geometry.size, self.viewport);
        if self.viewport.width != previous.width {
            next.x = position.x.min(max.x).max(0.0);
        }
        if self.viewport.height != previous.height {
            next.y = position.y.min(max.y).max(0.0);
        }
        if next == position {
            return false;
        }
        self.geometry.position = Some(next);
        true
    }

    fn ignored(&mut self, reason: PanelIgnoredReason) -> PanelTransition {
        self.transition(self.gesture, PanelEffect::Ignored { reason })
    }

    fn transition(&mut self, to: GestureState, effect: PanelEffect) -> PanelTransition {
        let from = self.gesture;
        self.gesture = to;
        self.transition_counter = self.transition_counter.saturating_add(1);
        PanelTransition {
            transition_id: self.transition_counter,
            from,
            to,
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PANEL_MIN_HEIGHT, PANEL_MIN_WIDTH};
    use dockpane_core::Size;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn controller_at(position: Point, size: Size, viewport: Viewport) -> PanelController {
        PanelController::new(
            PanelGeometry::floating(position, size),
            PanelConstraints::default(),
            viewport,
        )
    }

    fn standard() -> PanelController {
        controller_at(
            pt(300.0, 100.0),
            Size::new(420.0, 600.0),
            Viewport::new(1200.0, 800.0),
        )
    }

    #[test]
    fn header_drag_moves_live_and_commits_on_release() {
        let mut c = standard();
        let down = c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        assert_eq!(
            down.effect,
            PanelEffect::DragStarted {
                offset: pt(10.0, 10.0),
                origin: pt(300.0, 100.0)
            }
        );
        assert!(!down.requires_persist());

        let moved = c.pointer_move(pt(410.0, 160.0));
        assert_eq!(
            moved.effect,
            PanelEffect::Moved {
                position: pt(400.0, 150.0)
            }
        );
        assert!(!moved.requires_persist());
        assert_eq!(c.geometry().position, Some(pt(400.0, 150.0)));

        let up = c.pointer_up();
        assert!(up.requires_persist());
        assert_eq!(up.to, GestureState::Idle);
        match up.effect {
            PanelEffect::Committed {
                gesture, geometry, ..
            } => {
                assert_eq!(gesture, GestureKind::Drag);
                assert_eq!(geometry.position, Some(pt(400.0, 150.0)));
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn drag_snaps_to_left_edge() {
        let mut c = standard();
        c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        c.pointer_move(pt(25.0, 110.0));
        assert_eq!(c.geometry().position, Some(pt(0.0, 100.0)));
        // 190 is within 20px of the bottom limit (800 - 600)
        c.pointer_move(pt(25.0, 200.0));
        assert_eq!(c.geometry().position, Some(pt(0.0, 200.0)));
    }

    #[test]
    fn drag_ignored_while_docked() {
        let mut c = standard();
        c.cycle_dock_mode();
        let t = c.pointer_down(PanelHitTarget::Header, pt(900.0, 10.0));
        assert_eq!(t.ignored_reason(), Some(PanelIgnoredReason::NotFloating));
        assert!(!c.is_active());
    }

    #[test]
    fn header_actions_never_start_a_drag() {
        let mut c = standard();
        let t = c.pointer_down(PanelHitTarget::HeaderActions, pt(700.0, 110.0));
        assert_eq!(t.ignored_reason(), Some(PanelIgnoredReason::NotDraggable));
        let t = c.pointer_down(PanelHitTarget::Body, pt(500.0, 400.0));
        assert_eq!(t.ignored_reason(), Some(PanelIgnoredReason::NotDraggable));
    }

    #[test]
    fn second_pointer_down_is_ignored() {
        let mut c = standard();
        c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        let t = c.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::SE),
            pt(720.0, 700.0),
        );
        assert_eq!(
            t.ignored_reason(),
            Some(PanelIgnoredReason::ActiveGestureInProgress)
        );
        assert_eq!(c.gesture().kind(), Some(GestureKind::Drag));
    }

    #[test]
    fn move_and_release_without_gesture_are_ignored() {
        let mut c = standard();
        assert_eq!(
            c.pointer_move(pt(1.0, 1.0)).ignored_reason(),
            Some(PanelIgnoredReason::NoActiveGesture)
        );
        let up = c.pointer_up();
        assert_eq!(
            up.ignored_reason(),
            Some(PanelIgnoredReason::NoActiveGesture)
        );
        assert!(!up.requires_persist());
    }

    #[test]
    fn non_finite_pointer_is_ignored() {
        let mut c = standard();
        c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        let t = c.pointer_move(pt(f64::NAN, 10.0));
        assert_eq!(
            t.ignored_reason(),
            Some(PanelIgnoredReason::NonFiniteCoordinate)
        );
        assert_eq!(c.geometry().position, Some(pt(300.0, 100.0)));
    }

    #[test]
    fn nw_resize_moves_origin_and_keeps_corner() {
        let mut c = standard();
        let before = c.panel_rect();
        c.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::NW),
            pt(300.0, 100.0),
        );
        let t = c.pointer_move(pt(320.0, 140.0));
        let PanelEffect::Resized { rect, .. } = t.effect else {
            panic!("expected resize, got {:?}", t.effect);
        };
        assert_eq!(rect, Rect::new(320.0, 140.0, 400.0, 560.0));
        assert_eq!(rect.bottom_right(), before.bottom_right());
        assert!(c.pointer_up().requires_persist());
    }

    #[test]
    fn resize_respects_minimums() {
        let mut c = standard();
        c.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::SE),
            pt(720.0, 700.0),
        );
        c.pointer_move(pt(-5000.0, -5000.0));
        assert_eq!(
            c.geometry().size,
            Size::new(PANEL_MIN_WIDTH, PANEL_MIN_HEIGHT)
        );
        assert_eq!(c.geometry().position, Some(pt(300.0, 100.0)));
    }

    #[test]
    fn resize_is_measured_from_pointer_down() {
        let mut c = standard();
        c.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::E),
            pt(720.0, 300.0),
        );
        c.pointer_move(pt(760.0, 300.0));
        c.pointer_move(pt(740.0, 300.0));
        assert_eq!(c.geometry().size.width, 440.0);
    }

    #[test]
    fn resize_from_default_placement_materializes_position() {
        let mut c = PanelController::new(
            PanelGeometry::default(),
            PanelConstraints::default(),
            Viewport::new(1200.0, 800.0),
        );
        let origin = c.panel_rect().origin();
        c.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::SE),
            pt(1176.0, 776.0),
        );
        c.pointer_move(pt(1166.0, 766.0));
        assert_eq!(c.geometry().position, Some(origin));
        assert_eq!(c.geometry().size, Size::new(410.0, 590.0));
    }

    #[test]
    fn docked_right_resize_changes_width_only() {
        let mut c = standard();
        c.set_dock_mode(DockMode::Right);
        c.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::W),
            pt(780.0, 300.0),
        );
        let t = c.pointer_move(pt(730.0, 300.0));
        let PanelEffect::Resized { rect, .. } = t.effect else {
            panic!("expected resize");
        };
        assert_eq!(rect, Rect::new(730.0, 0.0, 470.0, 800.0));
        assert_eq!(c.geometry().size, Size::new(470.0, 600.0));
        assert_eq!(c.geometry().position, Some(pt(300.0, 100.0)));
    }

    #[test]
    fn docked_bottom_resize_changes_height_only() {
        let mut c = standard();
        c.set_dock_mode(DockMode::Bottom);
        c.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::N),
            pt(600.0, 200.0),
        );
        c.pointer_move(pt(600.0, 250.0));
        assert_eq!(c.geometry().size, Size::new(420.0, 550.0));
        assert_eq!(c.panel_rect(), Rect::new(0.0, 250.0, 1200.0, 550.0));
    }

    #[test]
    fn dock_cycle_four_times_restores_geometry() {
        let mut c = standard();
        let before = *c.geometry();
        let mut modes = Vec::new();
        for _ in 0..4 {
            let t = c.cycle_dock_mode();
            assert!(t.requires_persist());
            modes.push(c.dock_mode());
        }
        assert_eq!(
            modes,
            vec![
                DockMode::Right,
                DockMode::Left,
                DockMode::Bottom,
                DockMode::Floating
            ]
        );
        assert_eq!(*c.geometry(), before);
    }

    #[test]
    fn set_same_dock_mode_is_ignored() {
        let mut c = standard();
        let t = c.set_dock_mode(DockMode::Floating);
        assert_eq!(
            t.ignored_reason(),
            Some(PanelIgnoredReason::DockModeUnchanged)
        );
        assert!(!t.requires_persist());
    }

    #[test]
    fn dock_change_blocked_during_gesture() {
        let mut c = standard();
        c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        let t = c.cycle_dock_mode();
        assert_eq!(
            t.ignored_reason(),
            Some(PanelIgnoredReason::ActiveGestureInProgress)
        );
        assert_eq!(c.dock_mode(), DockMode::Floating);
    }

    #[test]
    fn viewport_shrink_reconciles_changed_axis() {
        let mut c = controller_at(
            pt(800.0, 400.0),
            Size::new(420.0, 600.0),
            Viewport::new(1200.0, 800.0),
        );
        let t = c.resize_viewport(Viewport::new(1000.0, 800.0));
        assert!(t.requires_persist());
        assert_eq!(c.geometry().position, Some(pt(580.0, 400.0)));
        assert_eq!(c.geometry().size, Size::new(420.0, 600.0));
    }

    #[test]
    fn viewport_growth_does_not_move_panel() {
        let mut c = standard();
        let t = c.resize_viewport(Viewport::new(1600.0, 1000.0));
        assert!(!t.requires_persist());
        assert_eq!(c.geometry().position, Some(pt(300.0, 100.0)));
    }

    #[test]
    fn viewport_change_while_docked_reconciles_on_undock() {
        let mut c = controller_at(
            pt(700.0, 100.0),
            Size::new(420.0, 600.0),
            Viewport::new(1200.0, 800.0),
        );
        c.set_dock_mode(DockMode::Left);
        let t = c.resize_viewport(Viewport::new(900.0, 800.0));
        assert!(!t.requires_persist());
        assert_eq!(c.geometry().position, Some(pt(700.0, 100.0)));
        c.set_dock_mode(DockMode::Floating);
        assert_eq!(c.geometry().position, Some(pt(480.0, 100.0)));
    }

    #[test]
    fn restored_off_screen_position_is_pulled_back_on_open() {
        let c = controller_at(
            pt(1800.0, 100.0),
            Size::new(420.0, 600.0),
            Viewport::new(1200.0, 800.0),
        );
        assert_eq!(c.geometry().position, Some(pt(780.0, 100.0)));
        assert!(c.panel_rect().right() <= 1200.0);
    }

    #[test]
    fn on_screen_overhang_is_kept_on_open() {
        let c = controller_at(
            pt(800.0, 400.0),
            Size::new(420.0, 600.0),
            Viewport::new(1200.0, 800.0),
        );
        assert_eq!(c.geometry().position, Some(pt(800.0, 400.0)));
    }

    #[test]
    fn height_only_change_still_fixes_off_screen_x() {
        let mut c = controller_at(
            pt(300.0, 100.0),
            Size::new(420.0, 600.0),
            Viewport::new(1200.0, 800.0),
        );
        c.set_dock_mode(DockMode::Left);
        c.replace_geometry(PanelGeometry {
            position: Some(pt(-500.0, 100.0)),
            size: Size::new(420.0, 600.0),
            dock_mode: DockMode::Left,
        });
        c.resize_viewport(Viewport::new(1200.0, 700.0));
        c.set_dock_mode(DockMode::Floating);
        assert_eq!(c.geometry().position, Some(pt(0.0, 100.0)));
    }

    #[test]
    fn replace_geometry_pulls_floating_position_in() {
        let mut c = standard();
        c.replace_geometry(PanelGeometry::floating(
            pt(100.0, 2000.0),
            Size::new(420.0, 600.0),
        ));
        assert_eq!(c.geometry().position, Some(pt(100.0, 200.0)));
    }

    #[test]
    fn invalid_viewport_is_ignored() {
        let mut c = standard();
        let t = c.resize_viewport(Viewport::new(0.0, 800.0));
        assert_eq!(t.ignored_reason(), Some(PanelIgnoredReason::InvalidViewport));
        assert_eq!(c.viewport(), Viewport::new(1200.0, 800.0));
    }

    #[test]
    fn cancel_commits_live_geometry() {
        let mut c = standard();
        c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        c.pointer_move(pt(410.0, 210.0));
        let t = c.cancel(CommitCause::FocusLost);
        assert!(t.requires_persist());
        assert_eq!(c.geometry().position, Some(pt(400.0, 200.0)));
        assert!(!c.is_active());
    }

    #[test]
    fn transition_ids_increase() {
        let mut c = standard();
        let a = c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        let b = c.pointer_move(pt(320.0, 120.0));
        let d = c.pointer_up();
        assert!(a.transition_id < b.transition_id);
        assert!(b.transition_id < d.transition_id);
    }

    #[derive(Debug, Default)]
    struct PanelTraceState {
        messages: Vec<String>,
    }

    struct PanelTraceCapture {
        state: Arc<Mutex<PanelTraceState>>,
    }

    impl<S: Subscriber> Layer<S> for PanelTraceCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if event.metadata().target() != "dockpane::panel" {
                return;
            }
            struct MessageVisitor(Option<String>);
            impl tracing::field::Visit for MessageVisitor {
                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "message" {
                        self.0 = Some(format!("{value:?}"));
                    }
                }
            }
            let mut visitor = MessageVisitor(None);
            event.record(&mut visitor);
            if let Some(message) = visitor.0 {
                self.state
                    .lock()
                    .expect("panel trace state lock")
                    .messages
                    .push(message);
            }
        }
    }

    #[test]
    fn gesture_lifecycle_emits_debug_events() {
        let trace_state = Arc::new(Mutex::new(PanelTraceState::default()));
        let subscriber = tracing_subscriber::registry().with(PanelTraceCapture {
            state: Arc::clone(&trace_state),
        });
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();

        let mut c = standard();
        c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        c.pointer_move(pt(320.0, 120.0));
        c.pointer_up();
        c.cycle_dock_mode();

        tracing::callsite::rebuild_interest_cache();
        let snapshot = trace_state.lock().expect("panel trace state lock");
        assert_eq!(
            snapshot.messages,
            vec![
                "drag started".to_string(),
                "gesture committed".to_string(),
                "dock mode changed".to_string(),
            ]
        );
    }

    #[test]
    fn replace_geometry_drops_gesture() {
        let mut c = standard();
        c.pointer_down(PanelHitTarget::Header, pt(310.0, 110.0));
        c.replace_geometry(PanelGeometry::default());
        assert!(!c.is_active());
        assert_eq!(*c.geometry(), PanelGeometry::default());
    }
}
