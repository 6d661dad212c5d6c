#![forbid(unsafe_code)]

//! `dockpane-web` connects a browser host to a [`dockpane_runtime::PanelSession`].
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding JS forwards DOM events as JSON and
//!   executes the capture commands it gets back.
//! - **One pointer at a time**: a second pointer never hijacks a gesture.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`; it is the layer a thin JS or
//! wasm shim wraps.

pub mod input_parser;
pub mod pointer_capture;

pub use input_parser::{
    HostInput, HostInputOutcome, InputParseError, PanelAction, PointerInput, PointerPhase,
    apply_host_input, parse_host_input,
};
pub use pointer_capture::{
    PanelPointerAdapter, PanelPointerCaptureCommand, PanelPointerCaptureConfig,
    PanelPointerDispatch, PanelPointerIgnoredReason, PanelPointerLifecyclePhase,
    PanelPointerLogEntry, PanelPointerLogOutcome,
};
