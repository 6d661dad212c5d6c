#![forbid(unsafe_code)]

//! Core: geometry primitives and normalized host input.
//!
//! # Role in dockpane
//! `dockpane-core` is the vocabulary layer. It owns the pixel-space geometry
//! types ([`Point`], [`Size`], [`Rect`], [`Viewport`]) and the small set of
//! input values (pointer buttons, key chords, modifiers) that the panel
//! controller and the host adapters exchange.
//!
//! # How it fits in the system
//! `dockpane-layout` builds the panel state machine on top of these types,
//! `dockpane-runtime` persists them, and `dockpane-web` decodes host events
//! into them. Nothing in this crate performs I/O.

pub mod event;
pub mod geometry;

pub use event::{KeyChord, KeyCode, Modifiers, PageVisibility, PointerButton};
pub use geometry::{Point, Rect, Size, Viewport};
