#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use dockpane_core::{Point, PointerButton, Viewport};
use dockpane_layout::{PanelHitTarget, ResizeHandle};
use dockpane_runtime::{MemoryStore, PanelConfig, PanelSession};
use dockpane_web::{PanelPointerAdapter, PanelPointerCaptureConfig, apply_host_input, parse_host_input};
use std::hint::black_box;

fn adapter() -> PanelPointerAdapter<MemoryStore> {
    let session = PanelSession::open(
        MemoryStore::new(),
        PanelConfig::default(),
        Viewport::new(1280.0, 800.0),
    );
    PanelPointerAdapter::new(session, PanelPointerCaptureConfig::default())
}

fn bench_panel_pointer_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel/web_pointer/lifecycle");

    group.bench_function("drag_down_ack_move_32_up", |b| {
        b.iter(|| {
            let mut adapter = adapter();
            let start = adapter.session().panel_rect().origin() + Point::new(40.0, 12.0);

            let down = adapter.pointer_down(PanelHitTarget::Header, 11, PointerButton::Primary, start);
            black_box(down.log.sequence);
            let ack = adapter.capture_acquired(11);
            black_box(ack.log.phase);

            for step in 0..32 {
                let delta = f64::from(step) * -7.5;
                let dispatch = adapter.pointer_move(11, start + Point::new(delta, delta / 2.0));
                black_box(dispatch.transition.map(|transition| transition.transition_id));
            }

            let up = adapter.pointer_up(11, PointerButton::Primary, start + Point::new(-240.0, -120.0));
            black_box(up.transition);
        });
    });

    group.bench_function("resize_se_move_120_blur", |b| {
        b.iter(|| {
            let mut adapter = adapter();
            let corner = adapter.session().panel_rect().bottom_right();

            adapter.pointer_down(
                PanelHitTarget::ResizeHandle(ResizeHandle::SE),
                23,
                PointerButton::Primary,
                corner,
            );
            adapter.capture_acquired(23);

            for step in 0..120 {
                let dx = -f64::from(step) * 1.5;
                let dy = -f64::from(step % 7);
                let dispatch = adapter.pointer_move(23, corner + Point::new(dx, dy));
                black_box(dispatch.log.sequence);
            }

            let blur = adapter.blur();
            black_box(blur.capture_command);
        });
    });

    group.finish();
}

fn bench_host_input_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel/web_pointer/host_input");
    let moves: Vec<String> = (0..64)
        .map(|step| {
            format!(
                r#"{{"kind":"pointer","phase":"move","pointer_id":5,"x":{},"y":{}}}"#,
                700 - step * 3,
                180 - step
            )
        })
        .collect();

    group.bench_function("parse_and_apply_64_moves", |b| {
        b.iter(|| {
            let mut adapter = adapter();
            let down = parse_host_input(
                r#"{"kind":"pointer","phase":"down","pointer_id":5,"x":876,"y":188,"target":"header"}"#,
            );
            if let Ok(Some(input)) = down {
                black_box(apply_host_input(&mut adapter, input));
            }
            for json in &moves {
                if let Ok(Some(input)) = parse_host_input(json) {
                    black_box(apply_host_input(&mut adapter, input));
                }
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_panel_pointer_lifecycle, bench_host_input_parse);
criterion_main!(benches);
