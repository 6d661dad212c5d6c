#![forbid(unsafe_code)]

//! JSON host input parser.
//!
//! The JS shim forwards DOM events as small JSON records, one per event:
//!
//! ```json
//! {"kind":"pointer","phase":"down","pointer_id":1,"button":0,"x":812,"y":190,"target":"header"}
//! {"kind":"key","key":"A","code":"KeyA","mods":5}
//! {"kind":"viewport","width":1280,"height":720}
//! ```
//!
//! [`parse_host_input`] turns one record into a [`HostInput`];
//! [`apply_host_input`] routes it to a [`PanelPointerAdapter`]. Kinds the
//! panel does not care about return `Ok(None)`.

use dockpane_core::{KeyChord, KeyCode, Modifiers, PageVisibility, Point, PointerButton, Viewport};
use dockpane_layout::{DockMode, PanelHitTarget, PanelTransition, ResizeHandle};
use dockpane_runtime::{KeyValueStore, PanelShortcut, PanelVisibility};
use serde::Deserialize;

use crate::pointer_capture::{PanelPointerAdapter, PanelPointerDispatch};

/// Errors from parsing host input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// A field carried a value outside its vocabulary.
    UnknownValue(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownValue(value) => write!(f, "unknown value: {value}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// Pointer lifecycle phase as sent by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
    /// `gotpointercapture`.
    CaptureAcquired,
    /// `lostpointercapture`.
    CaptureLost,
}

/// One pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    /// `None` only for a cancel that did not name its pointer.
    pub pointer_id: Option<u32>,
    pub button: PointerButton,
    pub position: Option<Point>,
    /// Hit target, required on `down`.
    pub target: Option<PanelHitTarget>,
}

/// Panel chrome buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Toggle,
    Open,
    Close,
    Minimize,
    /// Dock button: a named mode, or the next one in the cycle.
    Dock(Option<DockMode>),
    Reset,
}

/// A parsed host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostInput {
    Pointer(PointerInput),
    Key(KeyChord),
    Viewport(Viewport),
    Visibility(PageVisibility),
    Blur,
    Action(PanelAction),
}

/// What applying a [`HostInput`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostInputOutcome {
    Pointer(PanelPointerDispatch),
    Transition(PanelTransition),
    Shortcut(Option<PanelShortcut>),
    Visibility(PanelVisibility),
    /// Reset ran; `false` when the store refused the write.
    Reset { persisted: bool },
    Unchanged,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    pointer_id: Option<u32>,
    #[serde(default)]
    button: Option<i32>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    handle: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    mods: Option<i32>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    mode: Option<String>,
}

/// Parse one JSON host event.
///
/// Returns `Ok(None)` for unknown kinds and for keys with no panel meaning.
pub fn parse_host_input(json: &str) -> Result<Option<HostInput>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "pointer" => parse_pointer(&raw).map(|p| Some(HostInput::Pointer(p))),
        "key" => parse_key(&raw),
        "viewport" => parse_viewport(&raw).map(|v| Some(HostInput::Viewport(v))),
        "visibility" => parse_visibility(&raw).map(|v| Some(HostInput::Visibility(v))),
        "blur" => Ok(Some(HostInput::Blur)),
        "action" => parse_action(&raw).map(|a| Some(HostInput::Action(a))),
        _ => Ok(None),
    }
}

fn parse_modifiers(mods: Option<i32>) -> Modifiers {
    let bits = mods.unwrap_or(0).clamp(0, i32::from(u8::MAX)) as u8;
    Modifiers::from_bits_truncate(bits)
}

fn parse_position(raw: &RawInput) -> Result<Point, InputParseError> {
    let x = raw.x.ok_or(InputParseError::MissingField("x"))?;
    let y = raw.y.ok_or(InputParseError::MissingField("y"))?;
    Ok(Point::new(x, y))
}

fn parse_target(raw: &RawInput) -> Result<PanelHitTarget, InputParseError> {
    let target = raw
        .target
        .as_deref()
        .ok_or(InputParseError::MissingField("target"))?;
    match target {
        "header" => Ok(PanelHitTarget::Header),
        "header_actions" => Ok(PanelHitTarget::HeaderActions),
        "body" => Ok(PanelHitTarget::Body),
        "resize_handle" | "handle" => {
            let token = raw
                .handle
                .as_deref()
                .ok_or(InputParseError::MissingField("handle"))?;
            ResizeHandle::from_direction(token)
                .map(PanelHitTarget::ResizeHandle)
                .ok_or_else(|| InputParseError::UnknownValue(token.to_string()))
        }
        other => Err(InputParseError::UnknownValue(other.to_string())),
    }
}

fn parse_pointer(raw: &RawInput) -> Result<PointerInput, InputParseError> {
    let phase = match raw
        .phase
        .as_deref()
        .ok_or(InputParseError::MissingField("phase"))?
    {
        "down" => PointerPhase::Down,
        "move" => PointerPhase::Move,
        "up" => PointerPhase::Up,
        "cancel" => PointerPhase::Cancel,
        "leave" => PointerPhase::Leave,
        "capture" | "gotcapture" => PointerPhase::CaptureAcquired,
        "lostcapture" => PointerPhase::CaptureLost,
        other => return Err(InputParseError::UnknownValue(other.to_string())),
    };

    if raw.pointer_id.is_none() && phase != PointerPhase::Cancel {
        return Err(InputParseError::MissingField("pointer_id"));
    }

    let button = match raw.button {
        None => PointerButton::Primary,
        Some(index) => PointerButton::from_dom_index(index)
            .ok_or_else(|| InputParseError::UnknownValue(format!("button {index}")))?,
    };

    let position = match phase {
        PointerPhase::Down | PointerPhase::Move | PointerPhase::Up => Some(parse_position(raw)?),
        _ => None,
    };
    let target = match phase {
        PointerPhase::Down => Some(parse_target(raw)?),
        _ => None,
    };

    Ok(PointerInput {
        phase,
        pointer_id: raw.pointer_id,
        button,
        position,
        target,
    })
}

fn parse_key_code_opt(label: &str) -> Option<KeyCode> {
    match label {
        "Escape" | "Esc" => Some(KeyCode::Escape),
        "Enter" | "NumpadEnter" => Some(KeyCode::Enter),
        "Tab" => Some(KeyCode::Tab),
        "Backspace" => Some(KeyCode::Backspace),
        other => {
            // DOM KeyboardEvent.code fallback: KeyA..KeyZ
            if let Some(tail) = other.strip_prefix("Key") {
                let mut chars = tail.chars();
                if let Some(c) = chars.next()
                    && chars.next().is_none()
                {
                    return Some(KeyCode::Char(c.to_ascii_lowercase()));
                }
            }
            let mut chars = other.chars();
            if let Some(c) = chars.next()
                && chars.next().is_none()
            {
                return Some(KeyCode::Char(c));
            }
            None
        }
    }
}

fn parse_key(raw: &RawInput) -> Result<Option<HostInput>, InputParseError> {
    let key = raw.key.as_deref().filter(|s| !s.is_empty());
    let code = raw.code.as_deref().filter(|s| !s.is_empty());
    if key.is_none() && code.is_none() {
        return Err(InputParseError::MissingField("code"));
    }

    // Logical key first; physical code covers layouts where Shift+A reports
    // something other than a letter.
    let parsed = key
        .and_then(parse_key_code_opt)
        .or_else(|| code.and_then(parse_key_code_opt));
    Ok(parsed.map(|code| {
        HostInput::Key(KeyChord::new(code).with_modifiers(parse_modifiers(raw.mods)))
    }))
}

fn parse_viewport(raw: &RawInput) -> Result<Viewport, InputParseError> {
    let width = raw.width.ok_or(InputParseError::MissingField("width"))?;
    let height = raw.height.ok_or(InputParseError::MissingField("height"))?;
    Ok(Viewport::new(width, height))
}

fn parse_visibility(raw: &RawInput) -> Result<PageVisibility, InputParseError> {
    match raw
        .state
        .as_deref()
        .ok_or(InputParseError::MissingField("state"))?
    {
        "visible" => Ok(PageVisibility::Visible),
        "hidden" => Ok(PageVisibility::Hidden),
        other => Err(InputParseError::UnknownValue(other.to_string())),
    }
}

fn parse_action(raw: &RawInput) -> Result<PanelAction, InputParseError> {
    match raw
        .action
        .as_deref()
        .ok_or(InputParseError::MissingField("action"))?
    {
        "toggle" => Ok(PanelAction::Toggle),
        "open" => Ok(PanelAction::Open),
        "close" => Ok(PanelAction::Close),
        "minimize" => Ok(PanelAction::Minimize),
        "reset" => Ok(PanelAction::Reset),
        "dock" => match raw.mode.as_deref() {
            None => Ok(PanelAction::Dock(None)),
            Some(mode) => DockMode::parse(mode)
                .map(|m| PanelAction::Dock(Some(m)))
                .ok_or_else(|| InputParseError::UnknownValue(mode.to_string())),
        },
        other => Err(InputParseError::UnknownValue(other.to_string())),
    }
}

/// Route a parsed event to the adapter and its session.
pub fn apply_host_input<S: KeyValueStore>(
    adapter: &mut PanelPointerAdapter<S>,
    input: HostInput,
) -> HostInputOutcome {
    match input {
        HostInput::Pointer(pointer) => HostInputOutcome::Pointer(apply_pointer(adapter, pointer)),
        HostInput::Key(chord) => {
            HostInputOutcome::Shortcut(adapter.session_mut().handle_key(&chord))
        }
        HostInput::Viewport(viewport) => {
            HostInputOutcome::Transition(adapter.session_mut().resize_viewport(viewport))
        }
        HostInput::Visibility(PageVisibility::Hidden) => {
            HostInputOutcome::Pointer(adapter.visibility_hidden())
        }
        HostInput::Visibility(PageVisibility::Visible) => HostInputOutcome::Unchanged,
        HostInput::Blur => HostInputOutcome::Pointer(adapter.blur()),
        HostInput::Action(action) => apply_action(adapter, action),
    }
}

fn apply_pointer<S: KeyValueStore>(
    adapter: &mut PanelPointerAdapter<S>,
    pointer: PointerInput,
) -> PanelPointerDispatch {
    let id = pointer.pointer_id.unwrap_or(0);
    let position = pointer.position.unwrap_or(Point::ORIGIN);
    match pointer.phase {
        PointerPhase::Down => match pointer.target {
            Some(target) => adapter.pointer_down(target, id, pointer.button, position),
            // Parser guarantees a target; an empty hit test lands on the body.
            None => adapter.pointer_down(PanelHitTarget::Body, id, pointer.button, position),
        },
        PointerPhase::Move => adapter.pointer_move(id, position),
        PointerPhase::Up => adapter.pointer_up(id, pointer.button, position),
        PointerPhase::Cancel => adapter.pointer_cancel(pointer.pointer_id),
        PointerPhase::Leave => adapter.pointer_leave(id),
        PointerPhase::CaptureAcquired => adapter.capture_acquired(id),
        PointerPhase::CaptureLost => adapter.lost_pointer_capture(id),
    }
}

fn apply_action<S: KeyValueStore>(
    adapter: &mut PanelPointerAdapter<S>,
    action: PanelAction,
) -> HostInputOutcome {
    let session = adapter.session_mut();
    match action {
        PanelAction::Toggle => HostInputOutcome::Visibility(session.toggle()),
        PanelAction::Open => HostInputOutcome::Visibility(session.open_panel()),
        PanelAction::Close => HostInputOutcome::Visibility(session.close_panel()),
        PanelAction::Minimize => HostInputOutcome::Visibility(session.minimize()),
        PanelAction::Dock(None) => HostInputOutcome::Transition(session.cycle_dock_mode()),
        PanelAction::Dock(Some(mode)) => HostInputOutcome::Transition(session.set_dock_mode(mode)),
        PanelAction::Reset => match session.reset() {
            Ok(()) => HostInputOutcome::Reset { persisted: true },
            Err(err) => {
                tracing::warn!(target: "dockpane::web", error = %err, "panel reset not persisted");
                HostInputOutcome::Reset { persisted: false }
            }
        },
    }
}
