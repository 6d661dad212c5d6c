#![forbid(unsafe_code)]

//! Browser pointer-capture adapter for panel drag/resize.
//!
//! Bridges DOM pointer lifecycle signals into [`PanelSession`] gestures while
//! enforcing:
//! - one active pointer at a time,
//! - explicit capture acquire/release commands for JS hosts, and
//! - a commit on every interruption path (cancel, blur, hidden page, lost
//!   capture) so the panel never stays mid-gesture.

use dockpane_core::{Point, PointerButton};
use dockpane_layout::{CommitCause, PanelHitTarget, PanelIgnoredReason, PanelTransition};
use dockpane_runtime::{KeyValueStore, PanelSession};
use serde::{Deserialize, Serialize};

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPointerCaptureConfig {
    /// Button required to begin a gesture.
    pub activation_button: PointerButton,
    /// If true, pointer leave ends the gesture when capture was requested
    /// but never acknowledged by the host.
    pub cancel_on_leave_without_capture: bool,
}

impl Default for PanelPointerCaptureConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Primary,
            cancel_on_leave_without_capture: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

impl CaptureState {
    const fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePointer {
    pointer_id: u32,
    target: PanelHitTarget,
    button: PointerButton,
    last_position: Point,
    capture_state: CaptureState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DispatchContext {
    phase: PanelPointerLifecyclePhase,
    pointer_id: Option<u32>,
    target: Option<PanelHitTarget>,
    position: Option<Point>,
}

/// Host command for DOM `setPointerCapture()` / `releasePointerCapture()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PanelPointerCaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelPointerLifecyclePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerLeave,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
}

/// Why a lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum PanelPointerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    LeaveWhileCaptured,
    /// The panel controller declined the input.
    PanelRejected(PanelIgnoredReason),
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum PanelPointerLogOutcome {
    Forwarded,
    CaptureStateUpdated,
    Ignored(PanelPointerIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPointerLogEntry {
    pub phase: PanelPointerLifecyclePhase,
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub target: Option<PanelHitTarget>,
    pub position: Option<Point>,
    pub capture_command: Option<PanelPointerCaptureCommand>,
    pub outcome: PanelPointerLogOutcome,
}

/// Result of one pointer lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPointerDispatch {
    pub transition: Option<PanelTransition>,
    pub capture_command: Option<PanelPointerCaptureCommand>,
    pub log: PanelPointerLogEntry,
}

impl PanelPointerDispatch {
    fn ignored(
        phase: PanelPointerLifecyclePhase,
        reason: PanelPointerIgnoredReason,
        pointer_id: Option<u32>,
        target: Option<PanelHitTarget>,
        position: Option<Point>,
    ) -> Self {
        Self {
            transition: None,
            capture_command: None,
            log: PanelPointerLogEntry {
                phase,
                sequence: None,
                pointer_id,
                target,
                position,
                capture_command: None,
                outcome: PanelPointerLogOutcome::Ignored(reason),
            },
        }
    }

    fn capture_state_updated(
        phase: PanelPointerLifecyclePhase,
        pointer_id: u32,
        target: PanelHitTarget,
    ) -> Self {
        Self {
            transition: None,
            capture_command: None,
            log: PanelPointerLogEntry {
                phase,
                sequence: None,
                pointer_id: Some(pointer_id),
                target: Some(target),
                position: None,
                capture_command: None,
                outcome: PanelPointerLogOutcome::CaptureStateUpdated,
            },
        }
    }

    /// Whether the adapter forwarded the signal to the panel.
    #[must_use]
    pub const fn is_forwarded(&self) -> bool {
        matches!(self.log.outcome, PanelPointerLogOutcome::Forwarded)
    }

    /// Ignore reason, if the signal was dropped.
    #[must_use]
    pub const fn ignored_reason(&self) -> Option<PanelPointerIgnoredReason> {
        match self.log.outcome {
            PanelPointerLogOutcome::Ignored(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Pointer-capture adapter owning a [`PanelSession`].
///
/// Capture commands are meant to be wired straight to the DOM element the
/// pointer went down on.
#[derive(Debug)]
pub struct PanelPointerAdapter<S: KeyValueStore> {
    session: PanelSession<S>,
    config: PanelPointerCaptureConfig,
    active: Option<ActivePointer>,
    next_sequence: u64,
}

impl<S: KeyValueStore> PanelPointerAdapter<S> {
    #[must_use]
    pub fn new(session: PanelSession<S>, config: PanelPointerCaptureConfig) -> Self {
        Self {
            session,
            config,
            active: None,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn config(&self) -> PanelPointerCaptureConfig {
        self.config
    }

    #[must_use]
    pub fn session(&self) -> &PanelSession<S> {
        &self.session
    }

    /// Session access for non-pointer operations (dock button, keys, resize).
    pub fn session_mut(&mut self) -> &mut PanelSession<S> {
        &mut self.session
    }

    #[must_use]
    pub fn into_session(self) -> PanelSession<S> {
        self.session
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Handle pointer-down on a panel hit target.
    pub fn pointer_down(
        &mut self,
        target: PanelHitTarget,
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    ) -> PanelPointerDispatch {
        let phase = PanelPointerLifecyclePhase::PointerDown;
        if pointer_id == 0 {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::InvalidPointerId,
                Some(pointer_id),
                Some(target),
                Some(position),
            );
        }
        if button != self.config.activation_button {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                Some(target),
                Some(position),
            );
        }
        if self.active.is_some() {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::ActivePointerAlreadyInProgress,
                Some(pointer_id),
                Some(target),
                Some(position),
            );
        }

        let dispatch = self.forward(
            DispatchContext {
                phase,
                pointer_id: Some(pointer_id),
                target: Some(target),
                position: Some(position),
            },
            Some(PanelPointerCaptureCommand::Acquire { pointer_id }),
            |session| session.pointer_down(target, position),
        );
        if dispatch.is_forwarded() {
            self.active = Some(ActivePointer {
                pointer_id,
                target,
                button,
                last_position: position,
                capture_state: CaptureState::Requested,
            });
        }
        dispatch
    }

    /// Mark browser pointer capture as acquired.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> PanelPointerDispatch {
        let phase = PanelPointerLifecyclePhase::CaptureAcquired;
        let Some(mut active) = self.active else {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
                None,
            );
        };
        if active.pointer_id != pointer_id {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.target),
                None,
            );
        }
        active.capture_state = CaptureState::Acquired;
        self.active = Some(active);
        PanelPointerDispatch::capture_state_updated(phase, pointer_id, active.target)
    }

    /// Handle pointer-move for the active pointer.
    pub fn pointer_move(&mut self, pointer_id: u32, position: Point) -> PanelPointerDispatch {
        let phase = PanelPointerLifecyclePhase::PointerMove;
        let Some(mut active) = self.active else {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
                Some(position),
            );
        };
        if active.pointer_id != pointer_id {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.target),
                Some(position),
            );
        }

        let dispatch = self.forward(
            DispatchContext {
                phase,
                pointer_id: Some(pointer_id),
                target: Some(active.target),
                position: Some(position),
            },
            None,
            |session| session.pointer_move(position),
        );
        if dispatch.is_forwarded() {
            active.last_position = position;
            self.active = Some(active);
        }
        dispatch
    }

    /// Handle pointer-up; commits the gesture and releases capture.
    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    ) -> PanelPointerDispatch {
        let phase = PanelPointerLifecyclePhase::PointerUp;
        let Some(active) = self.active else {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
                Some(position),
            );
        };
        if active.pointer_id != pointer_id {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.target),
                Some(position),
            );
        }
        if active.button != button {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::ButtonMismatch,
                Some(pointer_id),
                Some(active.target),
                Some(position),
            );
        }

        let release = active
            .capture_state
            .is_acquired()
            .then_some(PanelPointerCaptureCommand::Release { pointer_id });
        let dispatch = self.forward(
            DispatchContext {
                phase,
                pointer_id: Some(pointer_id),
                target: Some(active.target),
                position: Some(position),
            },
            release,
            |session| session.pointer_up(),
        );
        // The gesture is over either way; a rejected release must not wedge
        // the adapter with a stale pointer.
        self.active = None;
        dispatch
    }

    /// Handle browser pointer-cancel.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> PanelPointerDispatch {
        self.cancel_active(
            PanelPointerLifecyclePhase::PointerCancel,
            pointer_id,
            CommitCause::PointerCancel,
            true,
        )
    }

    /// Handle pointer-leave.
    pub fn pointer_leave(&mut self, pointer_id: u32) -> PanelPointerDispatch {
        let phase = PanelPointerLifecyclePhase::PointerLeave;
        let Some(active) = self.active else {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
                None,
            );
        };
        if active.pointer_id != pointer_id {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.target),
                None,
            );
        }

        if matches!(active.capture_state, CaptureState::Requested)
            && self.config.cancel_on_leave_without_capture
        {
            self.cancel_active(phase, Some(pointer_id), CommitCause::PointerCancel, true)
        } else {
            PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::LeaveWhileCaptured,
                Some(pointer_id),
                Some(active.target),
                None,
            )
        }
    }

    /// Handle window blur.
    pub fn blur(&mut self) -> PanelPointerDispatch {
        self.cancel_active(
            PanelPointerLifecyclePhase::Blur,
            None,
            CommitCause::FocusLost,
            true,
        )
    }

    /// Handle the page becoming hidden. The settings record is written once:
    /// by the gesture commit when a pointer was active, by a flush otherwise.
    pub fn visibility_hidden(&mut self) -> PanelPointerDispatch {
        let dispatch = self.cancel_active(
            PanelPointerLifecyclePhase::VisibilityHidden,
            None,
            CommitCause::FocusLost,
            true,
        );
        if !dispatch.is_forwarded() {
            self.session.visibility_hidden();
        }
        dispatch
    }

    /// Handle `lostpointercapture`; the browser already released capture.
    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> PanelPointerDispatch {
        self.cancel_active(
            PanelPointerLifecyclePhase::LostPointerCapture,
            Some(pointer_id),
            CommitCause::CaptureLost,
            false,
        )
    }

    fn cancel_active(
        &mut self,
        phase: PanelPointerLifecyclePhase,
        pointer_id: Option<u32>,
        cause: CommitCause,
        release_capture: bool,
    ) -> PanelPointerDispatch {
        let Some(active) = self.active else {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::NoActivePointer,
                pointer_id,
                None,
                None,
            );
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return PanelPointerDispatch::ignored(
                phase,
                PanelPointerIgnoredReason::PointerMismatch,
                Some(id),
                Some(active.target),
                None,
            );
        }

        let command = (release_capture && active.capture_state.is_acquired()).then_some(
            PanelPointerCaptureCommand::Release {
                pointer_id: active.pointer_id,
            },
        );
        let dispatch = self.forward(
            DispatchContext {
                phase,
                pointer_id: Some(active.pointer_id),
                target: Some(active.target),
                position: Some(active.last_position),
            },
            command,
            |session| session.cancel(cause),
        );
        self.active = None;
        dispatch
    }

    fn forward(
        &mut self,
        context: DispatchContext,
        capture_command: Option<PanelPointerCaptureCommand>,
        apply: impl FnOnce(&mut PanelSession<S>) -> PanelTransition,
    ) -> PanelPointerDispatch {
        let sequence = self.next_sequence();
        let transition = apply(&mut self.session);
        if let Some(reason) = transition.ignored_reason() {
            tracing::trace!(
                target: "dockpane::web",
                phase = ?context.phase,
                ?reason,
                "panel rejected pointer signal"
            );
            return PanelPointerDispatch::ignored(
                context.phase,
                PanelPointerIgnoredReason::PanelRejected(reason),
                context.pointer_id,
                context.target,
                context.position,
            );
        }
        PanelPointerDispatch {
            transition: Some(transition),
            capture_command,
            log: PanelPointerLogEntry {
                phase: context.phase,
                sequence: Some(sequence),
                pointer_id: context.pointer_id,
                target: context.target,
                position: context.position,
                capture_command,
                outcome: PanelPointerLogOutcome::Forwarded,
            },
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::{
        PanelPointerAdapter, PanelPointerCaptureCommand, PanelPointerCaptureConfig,
        PanelPointerIgnoredReason, PanelPointerLifecyclePhase, PanelPointerLogOutcome,
    };
    use dockpane_core::{Point, PointerButton, Viewport};
    use dockpane_layout::{
        CommitCause, DockMode, GestureKind, PanelEffect, PanelHitTarget, PanelIgnoredReason,
        ResizeHandle,
    };
    use dockpane_runtime::{KeyValueStore, MemoryStore, PanelConfig, PanelSession, StorageResult};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn adapter() -> PanelPointerAdapter<MemoryStore> {
        let session = PanelSession::open(
            MemoryStore::new(),
            PanelConfig::default(),
            Viewport::new(1200.0, 800.0),
        );
        PanelPointerAdapter::new(session, PanelPointerCaptureConfig::default())
    }

    fn header_point(adapter: &PanelPointerAdapter<MemoryStore>) -> Point {
        adapter.session().panel_rect().origin() + Point::new(40.0, 12.0)
    }

    fn persisted(adapter: &PanelPointerAdapter<MemoryStore>) -> bool {
        adapter
            .session()
            .store()
            .get("panel_settings")
            .unwrap()
            .is_some()
    }

    #[test]
    fn pointer_down_starts_drag_and_requests_capture() {
        let mut adapter = adapter();
        let at = header_point(&adapter);
        let dispatch = adapter.pointer_down(PanelHitTarget::Header, 11, PointerButton::Primary, at);
        assert_eq!(
            dispatch.capture_command,
            Some(PanelPointerCaptureCommand::Acquire { pointer_id: 11 })
        );
        assert_eq!(dispatch.log.sequence, Some(1));
        assert_eq!(adapter.active_pointer_id(), Some(11));
        assert!(matches!(
            dispatch.transition.expect("transition").effect,
            PanelEffect::DragStarted { .. }
        ));
    }

    #[test]
    fn invalid_pointer_and_button_are_ignored() {
        let mut adapter = adapter();
        let at = header_point(&adapter);
        let zero = adapter.pointer_down(PanelHitTarget::Header, 0, PointerButton::Primary, at);
        assert_eq!(
            zero.ignored_reason(),
            Some(PanelPointerIgnoredReason::InvalidPointerId)
        );
        let right = adapter.pointer_down(PanelHitTarget::Header, 3, PointerButton::Secondary, at);
        assert_eq!(
            right.ignored_reason(),
            Some(PanelPointerIgnoredReason::ButtonNotAllowed)
        );
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn panel_rejection_is_reported_and_not_armed() {
        let mut adapter = adapter();
        adapter.session_mut().set_dock_mode(DockMode::Right);
        let dispatch = adapter.pointer_down(
            PanelHitTarget::Header,
            5,
            PointerButton::Primary,
            Point::new(900.0, 10.0),
        );
        assert_eq!(
            dispatch.ignored_reason(),
            Some(PanelPointerIgnoredReason::PanelRejected(
                PanelIgnoredReason::NotFloating
            ))
        );
        assert_eq!(dispatch.capture_command, None);
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn second_pointer_is_rejected() {
        let mut adapter = adapter();
        let at = header_point(&adapter);
        adapter.pointer_down(PanelHitTarget::Header, 1, PointerButton::Primary, at);
        let second = adapter.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::SE),
            2,
            PointerButton::Primary,
            at,
        );
        assert_eq!(
            second.ignored_reason(),
            Some(PanelPointerIgnoredReason::ActivePointerAlreadyInProgress)
        );
        let mv = adapter.pointer_move(2, at);
        assert_eq!(
            mv.ignored_reason(),
            Some(PanelPointerIgnoredReason::PointerMismatch)
        );
    }

    #[test]
    fn full_lifecycle_releases_capture_and_persists() {
        let mut adapter = adapter();
        let at = header_point(&adapter);
        adapter.pointer_down(PanelHitTarget::Header, 7, PointerButton::Primary, at);
        let ack = adapter.capture_acquired(7);
        assert_eq!(ack.log.outcome, PanelPointerLogOutcome::CaptureStateUpdated);

        let mv = adapter.pointer_move(7, at + Point::new(-100.0, -60.0));
        assert!(mv.is_forwarded());
        assert_eq!(mv.log.sequence, Some(2));
        assert!(!persisted(&adapter));

        let up = adapter.pointer_up(7, PointerButton::Primary, at + Point::new(-100.0, -60.0));
        assert_eq!(
            up.capture_command,
            Some(PanelPointerCaptureCommand::Release { pointer_id: 7 })
        );
        assert!(matches!(
            up.transition.expect("commit").effect,
            PanelEffect::Committed {
                gesture: GestureKind::Drag,
                cause: CommitCause::PointerUp,
                ..
            }
        ));
        assert_eq!(adapter.active_pointer_id(), None);
        assert!(persisted(&adapter));
    }

    #[test]
    fn pointer_up_without_acquired_capture_emits_no_release() {
        let mut adapter = adapter();
        let at = header_point(&adapter);
        adapter.pointer_down(PanelHitTarget::Header, 4, PointerButton::Primary, at);
        let up = adapter.pointer_up(4, PointerButton::Primary, at);
        assert!(up.is_forwarded());
        assert_eq!(up.capture_command, None);
    }

    #[test]
    fn leave_cancels_only_without_capture() {
        let mut adapter = adapter();
        let at = header_point(&adapter);
        adapter.pointer_down(PanelHitTarget::Header, 9, PointerButton::Primary, at);
        adapter.capture_acquired(9);
        let leave = adapter.pointer_leave(9);
        assert_eq!(
            leave.ignored_reason(),
            Some(PanelPointerIgnoredReason::LeaveWhileCaptured)
        );
        assert_eq!(adapter.active_pointer_id(), Some(9));

        adapter.pointer_up(9, PointerButton::Primary, at);
        adapter.pointer_down(PanelHitTarget::Header, 10, PointerButton::Primary, at);
        let leave = adapter.pointer_leave(10);
        assert_eq!(leave.log.phase, PanelPointerLifecyclePhase::PointerLeave);
        assert!(leave.is_forwarded());
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn blur_commits_and_releases() {
        let mut adapter = adapter();
        let corner = adapter.session().panel_rect().bottom_right();
        adapter.pointer_down(
            PanelHitTarget::ResizeHandle(ResizeHandle::SE),
            3,
            PointerButton::Primary,
            corner,
        );
        adapter.capture_acquired(3);
        adapter.pointer_move(3, corner + Point::new(30.0, 20.0));
        let blur = adapter.blur();
        assert_eq!(
            blur.capture_command,
            Some(PanelPointerCaptureCommand::Release { pointer_id: 3 })
        );
        assert!(matches!(
            blur.transition.expect("commit").effect,
            PanelEffect::Committed {
                gesture: GestureKind::Resize,
                cause: CommitCause::FocusLost,
                ..
            }
        ));
        assert!(persisted(&adapter));
    }

    #[test]
    fn lost_capture_commits_without_release() {
        let mut adapter = adapter();
        let at = header_point(&adapter);
        adapter.pointer_down(PanelHitTarget::Header, 6, PointerButton::Primary, at);
        adapter.capture_acquired(6);
        let mismatch = adapter.lost_pointer_capture(99);
        assert_eq!(
            mismatch.ignored_reason(),
            Some(PanelPointerIgnoredReason::PointerMismatch)
        );
        let lost = adapter.lost_pointer_capture(6);
        assert!(lost.is_forwarded());
        assert_eq!(lost.capture_command, None);
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn visibility_hidden_flushes_without_active_pointer() {
        let mut adapter = adapter();
        let hidden = adapter.visibility_hidden();
        assert_eq!(
            hidden.ignored_reason(),
            Some(PanelPointerIgnoredReason::NoActivePointer)
        );
        assert!(persisted(&adapter));
    }

    #[derive(Debug, Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: AtomicUsize,
    }

    impl KeyValueStore for CountingStore {
        fn name(&self) -> &str {
            "CountingStore"
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.inner.remove(key)
        }
    }

    fn counting_adapter() -> PanelPointerAdapter<CountingStore> {
        let session = PanelSession::open(
            CountingStore::default(),
            PanelConfig::default(),
            Viewport::new(1200.0, 800.0),
        );
        PanelPointerAdapter::new(session, PanelPointerCaptureConfig::default())
    }

    fn writes(adapter: &PanelPointerAdapter<CountingStore>) -> usize {
        adapter.session().store().writes.load(Ordering::SeqCst)
    }

    #[test]
    fn visibility_hidden_mid_drag_writes_once() {
        let mut adapter = counting_adapter();
        let at = adapter.session().panel_rect().origin() + Point::new(40.0, 12.0);
        adapter.pointer_down(PanelHitTarget::Header, 8, PointerButton::Primary, at);
        adapter.capture_acquired(8);
        adapter.pointer_move(8, at + Point::new(-50.0, -50.0));
        assert_eq!(writes(&adapter), 0);

        let hidden = adapter.visibility_hidden();
        assert!(hidden.is_forwarded());
        assert_eq!(writes(&adapter), 1);
    }

    #[test]
    fn visibility_hidden_when_idle_writes_once() {
        let mut adapter = counting_adapter();
        adapter.visibility_hidden();
        assert_eq!(writes(&adapter), 1);
    }

    #[test]
    fn log_entry_serializes_for_host_console() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(
            PanelHitTarget::Body,
            2,
            PointerButton::Primary,
            Point::new(1.0, 2.0),
        );
        let json = serde_json::to_value(dispatch.log).expect("serialize log entry");
        assert_eq!(json["phase"], "pointer_down");
        assert_eq!(json["outcome"]["outcome"], "ignored");
        assert_eq!(json["outcome"]["reason"]["reason"], "panel_rejected");
        assert_eq!(json["outcome"]["reason"]["detail"], "not_draggable");
    }
}
