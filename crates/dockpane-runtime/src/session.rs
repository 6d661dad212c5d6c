#![forbid(unsafe_code)]

//! Panel session: controller, settings record, store and visibility.
//!
//! [`PanelSession`] is what a host embeds. It forwards gestures to the
//! [`PanelController`] and turns committed geometry into writes of the
//! settings record. Persistence failures are logged and swallowed on the
//! gesture path; [`PanelSession::persist`] returns them for callers that
//! want to know.

use dockpane_core::{KeyChord, KeyCode, Modifiers, PageVisibility, Point, Rect, Viewport};
use dockpane_layout::{
    CommitCause, DockMode, PanelController, PanelGeometry, PanelHitTarget, PanelTransition,
};
use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;
use crate::settings::PanelSettings;
use crate::storage::{KeyValueStore, StorageResult};

/// Whether the panel is shown. Not persisted; every page load starts closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelVisibility {
    #[default]
    Closed,
    Open,
    /// Shown with the body collapsed.
    Minimized,
}

impl PanelVisibility {
    /// Open or minimized.
    #[must_use]
    pub const fn is_shown(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// `Closed -> Open`, anything else `-> Closed`.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open | Self::Minimized => Self::Closed,
        }
    }

    /// `Open <-> Minimized`; a closed panel stays closed.
    #[must_use]
    pub const fn minimize_toggled(self) -> Self {
        match self {
            Self::Closed => Self::Closed,
            Self::Open => Self::Minimized,
            Self::Minimized => Self::Open,
        }
    }

    /// Icon of the minimize button in this state.
    #[must_use]
    pub const fn minimize_icon(self) -> &'static str {
        match self {
            Self::Minimized => "expand_more",
            Self::Closed | Self::Open => "expand_less",
        }
    }
}

/// Keyboard shortcut recognized by [`PanelSession::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelShortcut {
    /// Ctrl/Cmd + Shift + A.
    TogglePanel,
    /// Escape while the panel is shown.
    ClosePanel,
}

impl PanelShortcut {
    /// Shortcut bound to `chord` given the current visibility.
    #[must_use]
    pub fn match_chord(chord: &KeyChord, visibility: PanelVisibility) -> Option<Self> {
        if chord.modifiers.has_command()
            && chord.modifiers.contains(Modifiers::SHIFT)
            && chord.is_char_ignore_case('a')
        {
            return Some(Self::TogglePanel);
        }
        if chord.code == KeyCode::Escape && visibility.is_shown() {
            return Some(Self::ClosePanel);
        }
        None
    }
}

/// A live panel bound to a store.
#[derive(Debug)]
pub struct PanelSession<S: KeyValueStore> {
    store: S,
    config: PanelConfig,
    settings: PanelSettings,
    controller: PanelController,
    visibility: PanelVisibility,
}

impl<S: KeyValueStore> PanelSession<S> {
    /// Restore the panel from `store`, or start from defaults.
    ///
    /// A missing or malformed record is not an error: the defaults are used
    /// and a warning is logged.
    pub fn open(store: S, config: PanelConfig, viewport: Viewport) -> Self {
        let defaults = PanelSettings::with_default_size(config.default_size());
        let settings = PanelSettings::load_or(&store, &config.storage_key, defaults);
        let controller = PanelController::new(settings.geometry(), config.constraints(), viewport);
        tracing::debug!(
            target: "dockpane::session",
            store = store.name(),
            key = %config.storage_key,
            dock_mode = settings.dock_mode.as_str(),
            "panel session opened"
        );
        Self {
            store,
            config,
            settings,
            controller,
            visibility: PanelVisibility::Closed,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to reopen a session on it.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Settings record with the geometry as of the last persist.
    #[must_use]
    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    #[must_use]
    pub fn controller(&self) -> &PanelController {
        &self.controller
    }

    /// Live geometry, including uncommitted gesture updates.
    #[must_use]
    pub fn geometry(&self) -> &PanelGeometry {
        self.controller.geometry()
    }

    #[must_use]
    pub fn panel_rect(&self) -> Rect {
        self.controller.panel_rect()
    }

    #[must_use]
    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn pointer_down(&mut self, target: PanelHitTarget, pointer: Point) -> PanelTransition {
        let transition = self.controller.pointer_down(target, pointer);
        self.after(transition)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> PanelTransition {
        let transition = self.controller.pointer_move(pointer);
        self.after(transition)
    }

    pub fn pointer_up(&mut self) -> PanelTransition {
        let transition = self.controller.pointer_up();
        self.after(transition)
    }

    /// End the active gesture early; the live geometry is committed.
    pub fn cancel(&mut self, cause: CommitCause) -> PanelTransition {
        let transition = self.controller.cancel(cause);
        self.after(transition)
    }

    pub fn cycle_dock_mode(&mut self) -> PanelTransition {
        let transition = self.controller.cycle_dock_mode();
        self.after(transition)
    }

    pub fn set_dock_mode(&mut self, mode: DockMode) -> PanelTransition {
        let transition = self.controller.set_dock_mode(mode);
        self.after(transition)
    }

    /// Host window resized; persists only if the panel had to move.
    pub fn resize_viewport(&mut self, viewport: Viewport) -> PanelTransition {
        let transition = self.controller.resize_viewport(viewport);
        self.after(transition)
    }

    /// Window lost focus.
    pub fn blur(&mut self) -> PanelTransition {
        self.cancel(CommitCause::FocusLost)
    }

    /// Page visibility changed. Only hiding has an effect.
    pub fn visibility_changed(&mut self, visibility: PageVisibility) -> Option<PanelTransition> {
        match visibility {
            PageVisibility::Visible => None,
            PageVisibility::Hidden => Some(self.visibility_hidden()),
        }
    }

    /// Page hidden: commit any gesture and flush the record, since the page
    /// may never come back.
    pub fn visibility_hidden(&mut self) -> PanelTransition {
        let transition = self.controller.cancel(CommitCause::FocusLost);
        self.persist_logged();
        transition
    }

    pub fn toggle(&mut self) -> PanelVisibility {
        let next = self.visibility.toggled();
        self.set_visibility(next)
    }

    pub fn open_panel(&mut self) -> PanelVisibility {
        self.set_visibility(PanelVisibility::Open)
    }

    pub fn close_panel(&mut self) -> PanelVisibility {
        self.set_visibility(PanelVisibility::Closed)
    }

    pub fn minimize(&mut self) -> PanelVisibility {
        let next = self.visibility.minimize_toggled();
        self.set_visibility(next)
    }

    /// Apply a global shortcut. Returns the shortcut when the chord was consumed.
    pub fn handle_key(&mut self, chord: &KeyChord) -> Option<PanelShortcut> {
        let shortcut = PanelShortcut::match_chord(chord, self.visibility)?;
        match shortcut {
            PanelShortcut::TogglePanel => {
                self.toggle();
            }
            PanelShortcut::ClosePanel => {
                self.close_panel();
            }
        }
        Some(shortcut)
    }

    /// Restore default settings and geometry, then persist.
    pub fn reset(&mut self) -> StorageResult<()> {
        self.settings = PanelSettings::with_default_size(self.config.default_size());
        self.controller.replace_geometry(self.settings.geometry());
        tracing::debug!(target: "dockpane::session", "panel settings reset");
        self.persist()
    }

    /// Edit preferences (theme, font size, ...) and persist.
    ///
    /// Geometry is owned by the controller; edits to it here are discarded.
    pub fn update_settings(&mut self, edit: impl FnOnce(&mut PanelSettings)) -> StorageResult<()> {
        edit(&mut self.settings);
        self.persist()
    }

    /// Write the full record with the current geometry.
    pub fn persist(&mut self) -> StorageResult<()> {
        self.settings.set_geometry(self.controller.geometry());
        self.settings.save(&self.store, &self.config.storage_key)
    }

    fn set_visibility(&mut self, next: PanelVisibility) -> PanelVisibility {
        if next == PanelVisibility::Closed && self.controller.is_active() {
            let transition = self.controller.cancel(CommitCause::Programmatic);
            self.after(transition);
        }
        if next != self.visibility {
            tracing::debug!(
                target: "dockpane::session",
                from = ?self.visibility,
                to = ?next,
                "panel visibility changed"
            );
            self.visibility = next;
        }
        self.visibility
    }

    fn after(&mut self, transition: PanelTransition) -> PanelTransition {
        if transition.requires_persist() {
            self.persist_logged();
        }
        transition
    }

    fn persist_logged(&mut self) {
        if let Err(err) = self.persist() {
            tracing::warn!(
                target: "dockpane::session",
                store = self.store.name(),
                key = %self.config.storage_key,
                error = %err,
                "failed to persist panel settings"
            );
        }
    }
}
