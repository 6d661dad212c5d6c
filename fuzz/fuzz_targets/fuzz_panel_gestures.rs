#![no_main]

use arbitrary::Arbitrary;
use dockpane_core::{Point, Viewport};
use dockpane_layout::{
    CommitCause, DockMode, PanelConstraints, PanelController, PanelGeometry, PanelHitTarget,
    ResizeHandle,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Down { target: u8, x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up,
    Cancel,
    CycleDock,
    Viewport { width: u16, height: u16 },
}

fn target(code: u8) -> PanelHitTarget {
    match code % 4 {
        0 => PanelHitTarget::Header,
        1 => PanelHitTarget::Body,
        2 => PanelHitTarget::HeaderActions,
        _ => PanelHitTarget::ResizeHandle(ResizeHandle::ALL[usize::from(code / 4) % 8]),
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut controller = PanelController::new(
        PanelGeometry::default(),
        PanelConstraints::default(),
        Viewport::new(1280.0, 800.0),
    );

    for op in ops.into_iter().take(512) {
        let ends_gesture = matches!(op, Op::Up | Op::Cancel);
        let point = |x: i16, y: i16| Point::new(f64::from(x), f64::from(y));
        match op {
            Op::Down { target: t, x, y } => {
                controller.pointer_down(target(t), point(x, y));
            }
            Op::Move { x, y } => {
                controller.pointer_move(point(x, y));
            }
            Op::Up => {
                controller.pointer_up();
            }
            Op::Cancel => {
                controller.cancel(CommitCause::PointerCancel);
            }
            Op::CycleDock => {
                controller.cycle_dock_mode();
            }
            Op::Viewport { width, height } => {
                controller.resize_viewport(Viewport::new(f64::from(width), f64::from(height)));
            }
        }

        let geometry = controller.geometry();
        assert!(geometry.size.is_finite_positive(), "size: {:?}", geometry.size);
        if let Some(position) = geometry.position {
            assert!(position.is_finite(), "position: {position:?}");
        }
        if geometry.dock_mode != DockMode::Floating {
            assert!(controller.panel_rect().size().is_finite_positive());
        }
        if ends_gesture {
            assert!(controller.gesture().is_idle());
        }
    }
});
