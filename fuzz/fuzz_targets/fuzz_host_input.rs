#![no_main]

use dockpane_core::Viewport;
use dockpane_runtime::{MemoryStore, PanelConfig, PanelSession};
use dockpane_web::{PanelPointerAdapter, PanelPointerCaptureConfig, apply_host_input, parse_host_input};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 16 * 1024 {
        return;
    }

    let session = PanelSession::open(
        MemoryStore::new(),
        PanelConfig::default(),
        Viewport::new(1280.0, 800.0),
    );
    let mut adapter = PanelPointerAdapter::new(session, PanelPointerCaptureConfig::default());

    // One JSON record per line, the way the host shim batches them.
    for line in text.lines() {
        let Ok(Some(input)) = parse_host_input(line) else {
            continue;
        };
        apply_host_input(&mut adapter, input);

        let size = adapter.session().geometry().size;
        assert!(size.is_finite_positive(), "panel size degenerated: {size:?}");
    }

    // Blur always leaves the panel idle.
    adapter.blur();
    assert!(adapter.active_pointer_id().is_none());
    assert!(!adapter.session().controller().is_active());
});
