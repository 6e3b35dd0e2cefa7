//! Frame diff and repaint benchmarks.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use trellis::{
    Core, TermBuf, diff,
    geom::{Expanse, Point},
    layout::{Linear, Policy},
    style::Style,
    testing::{Harness, TestRender},
    widgets::{Container, Label},
};

/// Two 200x60 frames differing in a sprinkling of cells.
fn frames() -> (TermBuf, TermBuf) {
    let size = Expanse::new(200, 60);
    let prev = TermBuf::new(size, '.', Style::default());
    let mut next = prev.clone();
    for i in 0..400u32 {
        next.put(Point::new((i * 37) % 200, (i * 11) % 60), '#', Style::default());
    }
    (prev, next)
}

fn benchmark_diff(c: &mut Criterion) {
    let (prev, next) = frames();
    let all = [prev.rect()];
    c.bench_function("diff_full_screen", |b| {
        b.iter(|| black_box(diff::diff(black_box(&prev), black_box(&next), &all)))
    });
    c.bench_function("diff_identical", |b| {
        b.iter(|| black_box(diff::diff(black_box(&prev), black_box(&prev), &all)))
    });
}

fn benchmark_repaint(c: &mut Criterion) {
    c.bench_function("repaint_one_label", |b| {
        let mut core = Core::new(Container::new()).expect("core");
        let root = core.root_id();
        core.set_layout(root, Linear::column(Policy::Clip))
            .expect("layout");
        let labels: Vec<_> = (0..50)
            .map(|i| core.add_child(root, Label::new(format!("row {i}"))))
            .collect::<Result<_, _>>()
            .expect("labels");
        let mut h = Harness::with_size(core, Expanse::new(120, 50)).expect("harness");
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            h.app
                .core
                .update::<Label, _>(labels[25], |l, ctx| l.set_text(ctx, format!("tick {n}")))
                .expect("update");
            h.app.repaint(&mut TestRender::new()).expect("repaint");
        })
    });
}

criterion_group!(benches, benchmark_diff, benchmark_repaint);
criterion_main!(benches);
