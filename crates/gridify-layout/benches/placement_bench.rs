//! Benchmarks for occupancy, projection and gesture application.
//!
//! Run with: cargo bench -p gridify-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridify_layout::{
    ContainerBounds, DragPayload, GestureEvent, GridCell, GridConfiguration, GridEditor,
    GridItemPatch, PlacementStore, Point, project, unoccupied_cells,
};
use std::hint::black_box;

/// Editor on a `side`×`side` grid holding `n` items, some of them spanning.
fn make_editor(side: u16, n: usize) -> GridEditor {
    let mut editor = GridEditor::with_store(
        Default::default(),
        PlacementStore::new(|| "hsl(200, 80%, 50%)".to_string(), "Item"),
    );
    editor.set_configuration(GridConfiguration::new(side, side, 8).expect("bench grid"));
    editor.set_container(ContainerBounds::from_size(1600.0, 1200.0));
    for i in 0..n {
        let row = (i as u16 % side) + 1;
        let col = ((i as u16 * 7) % side) + 1;
        let item = editor.add_item(GridCell::new(row, col)).expect("id space");
        if i % 3 == 0 {
            let patch = GridItemPatch::ends((col + 3).min(side + 1), (row + 2).min(side + 1));
            editor.update_item(item.id, &patch);
        }
    }
    editor
}

fn bench_occupancy(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/occupancy");
    for (side, n) in [(12, 10), (24, 50), (100, 400)] {
        let editor = make_editor(side, n);
        let config = editor.configuration();
        group.bench_with_input(
            BenchmarkId::new("unoccupied", format!("{side}x{side}/{n}")),
            editor.items(),
            |b, items| b.iter(|| black_box(unoccupied_cells(&config, items))),
        );
    }
    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/project");
    for n in [1, 10, 100, 500] {
        let editor = make_editor(24, n);
        let config = editor.configuration();
        group.bench_with_input(BenchmarkId::new("items", n), editor.items(), |b, items| {
            b.iter(|| black_box(project(&config, items)))
        });
    }
    group.finish();
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/gesture");

    group.bench_function("drop", |b| {
        b.iter_batched(
            || make_editor(24, 50),
            |mut editor| {
                let id = editor.items()[0].id;
                let payload = DragPayload::new(id, Point::new(4.0, 4.0));
                black_box(editor.apply(&GestureEvent::Drop {
                    payload: Some(payload),
                    pointer: Point::new(640.0, 480.0),
                }))
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("resize_stream_64", |b| {
        b.iter_batched(
            || make_editor(24, 50),
            |mut editor| {
                let id = editor.items()[0].id;
                let origin = Point::new(50.0, 50.0);
                editor.apply(&GestureEvent::ResizeStart {
                    item_id: id,
                    pointer: origin,
                });
                for step in 0..64 {
                    let d = f64::from(step) * 9.0;
                    editor.apply(&GestureEvent::PointerMove {
                        pointer: origin.plus(Point::new(d, d * 0.5)),
                    });
                }
                black_box(editor.apply(&GestureEvent::PointerUp { pointer: origin }))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_occupancy, bench_projection, bench_gestures);

criterion_main!(benches);
