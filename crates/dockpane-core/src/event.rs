#![forbid(unsafe_code)]

//! Normalized host input values.
//!
//! These are deliberately small: the panel only cares about which pointer
//! button went down, which key chord was pressed, and whether the page is
//! still visible. Pointer coordinates are plain [`crate::Point`] values.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Keyboard modifier state.
    ///
    /// Bit layout matches the host encoding: shift=1, alt=2, ctrl=4, meta=8.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS: either counts as the command key.
    #[inline]
    pub fn has_command(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// Pointer button as reported by DOM `PointerEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
}

impl PointerButton {
    /// Map a DOM button index (0 = primary, 1 = auxiliary, 2 = secondary).
    #[must_use]
    pub const fn from_dom_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Auxiliary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Key identity, reduced to what panel shortcuts need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    /// A printable character, as reported (case preserved).
    Char(char),
    Escape,
    Enter,
    Tab,
    Backspace,
}

/// A key press together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// A key press without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Case-insensitive check for a character key.
    #[must_use]
    pub fn is_char_ignore_case(&self, expected: char) -> bool {
        match self.code {
            KeyCode::Char(c) => c.eq_ignore_ascii_case(&expected),
            _ => false,
        }
    }
}

/// Document visibility as reported by `visibilitychange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageVisibility {
    Visible,
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_key_accepts_ctrl_or_meta() {
        assert!(Modifiers::CTRL.has_command());
        assert!(Modifiers::META.has_command());
        assert!((Modifiers::META | Modifiers::SHIFT).has_command());
        assert!(!Modifiers::SHIFT.has_command());
        assert!(!Modifiers::empty().has_command());
    }

    #[test]
    fn dom_button_mapping() {
        assert_eq!(PointerButton::from_dom_index(0), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_dom_index(2), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_dom_index(7), None);
    }

    #[test]
    fn char_match_ignores_case() {
        let chord = KeyChord::new(KeyCode::Char('A'));
        assert!(chord.is_char_ignore_case('a'));
        assert!(!KeyChord::new(KeyCode::Escape).is_char_ignore_case('a'));
    }

    #[test]
    fn modifier_bits_match_host_encoding() {
        assert_eq!(Modifiers::from_bits_truncate(4), Modifiers::CTRL);
        assert_eq!(
            Modifiers::from_bits_truncate(5),
            Modifiers::CTRL | Modifiers::SHIFT
        );
    }
}
