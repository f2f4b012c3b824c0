//! End-to-end editor scenarios: add, resize, move, remove, and the code
//! that mirrors them.

use std::cell::RefCell;
use std::rc::Rc;

use gridify_layout::{
    ContainerBounds, DragPayload, EditorSettings, GestureEffect, GestureEvent, GestureNoopReason,
    GridArea, GridCell, GridConfiguration, GridEditor, GridItemPatch, PlacementStore, Point,
    project,
};

/// 12×8, gap 10, container 1210×870 placed at (20, 40).
///
/// Cells are 91.67×100; the column stride used for drops is 100.83.
fn editor() -> GridEditor {
    let mut editor = GridEditor::with_store(
        EditorSettings::default(),
        PlacementStore::new(|| "hsl(180, 80%, 50%)".to_string(), "Item"),
    );
    editor.set_container(ContainerBounds::new(20.0, 40.0, 1210.0, 870.0));
    editor
}

fn client(editor: &GridEditor, x: f64, y: f64) -> Point {
    editor.container().origin().plus(Point::new(x, y))
}

#[test]
fn add_then_resize_two_cells_right() {
    let mut editor = editor();
    let item = editor.add_item(GridCell::new(1, 1)).unwrap();
    assert_eq!(item.area, GridArea::new(1, 2, 1, 2).unwrap());

    let handle = client(&editor, 85.0, 95.0);
    editor.apply(&GestureEvent::ResizeStart {
        item_id: item.id,
        pointer: handle,
    });
    let w = editor.cell_geometry().cell_width;
    editor.apply(&GestureEvent::PointerMove {
        pointer: handle.plus(Point::new(2.0 * w, 0.0)),
    });
    editor.apply(&GestureEvent::PointerUp {
        pointer: handle.plus(Point::new(2.0 * w, 0.0)),
    });

    let resized = editor.store().get(item.id).unwrap();
    assert_eq!((resized.col_start(), resized.col_end()), (1, 4));
    assert_eq!((resized.row_start(), resized.row_end()), (1, 2));
}

#[test]
fn move_clamps_to_last_legal_start_line() {
    let mut editor = editor();
    let item = editor.add_item(GridCell::new(1, 1)).unwrap();
    editor.update_item(item.id, &GridItemPatch::ends(4, 2));

    let grab = Point::new(30.0, 20.0);
    let start = client(&editor, grab.x, grab.y);
    editor.begin_drag(item.id, start);

    // Corner on column line 11 (10 strides in).
    let stride = editor.cell_geometry().cell_width + 10.0 * 11.0 / 12.0;
    let drop_at = client(&editor, 10.0 * stride + grab.x, grab.y);
    let t = editor.apply(&GestureEvent::Drop {
        payload: Some(DragPayload::new(item.id, grab)),
        pointer: drop_at,
    });
    assert!(t.effect.is_commit());

    let moved = editor.store().get(item.id).unwrap();
    assert_eq!(moved.col_start(), 10);
    assert_eq!(moved.col_end(), 13);
    assert_eq!(moved.col_end(), editor.configuration().columns() + 1);
    assert_eq!(moved.area.col_span(), 3);
}

#[test]
fn removal_mid_resize_is_harmless() {
    let mut editor = editor();
    let item = editor.add_item(GridCell::new(2, 2)).unwrap();
    let handle = client(&editor, 190.0, 200.0);
    editor.apply(&GestureEvent::ResizeStart {
        item_id: item.id,
        pointer: handle,
    });
    editor.remove_item(item.id);
    let version = editor.store().version();

    for step in 1..5 {
        let t = editor.apply(&GestureEvent::PointerMove {
            pointer: handle.plus(Point::new(f64::from(step) * 120.0, 0.0)),
        });
        assert_eq!(
            t.effect,
            GestureEffect::Noop {
                reason: GestureNoopReason::UnknownItem
            }
        );
    }
    editor.apply(&GestureEvent::PointerUp { pointer: handle });

    assert_eq!(editor.store().version(), version);
    assert!(editor.items().is_empty());
    assert!(!editor.gestures().is_active());
}

#[test]
fn overlap_is_permitted() {
    let mut editor = editor();
    let a = editor.add_item(GridCell::new(1, 1)).unwrap();
    editor.update_item(a.id, &GridItemPatch::ends(4, 4));
    let b = editor.add_item(GridCell::new(2, 2)).unwrap();
    assert_eq!(editor.items().len(), 2);
    assert!(editor.items()[0].area.overlaps(&editor.items()[1].area));
    assert_eq!(editor.items()[1].id, b.id);
    assert_eq!(editor.unoccupied_cells().len(), 96 - 9);
}

#[test]
fn stylesheet_has_one_block_per_item_plus_container() {
    let mut editor = editor();
    for col in 1..=5 {
        editor.add_item(GridCell::new(1, col)).unwrap();
    }
    let css = editor.project().stylesheet;
    let blocks = css.lines().filter(|line| line.ends_with('{')).count();
    assert_eq!(blocks, editor.items().len() + 1);
    let markup = editor.project().markup;
    assert_eq!(markup.matches("class=\"grid-item ").count(), 5);
}

#[test]
fn projection_is_deterministic_and_local() {
    let mut editor = editor();
    let ids: Vec<_> = (1..=3)
        .map(|col| editor.add_item(GridCell::new(1, col)).unwrap().id)
        .collect();
    let before = editor.project();
    assert_eq!(before, editor.project());

    editor.update_item(ids[1], &GridItemPatch::default().color("rebeccapurple"));
    let after = editor.project();
    assert_eq!(before.markup, after.markup);

    let old_blocks: Vec<&str> = before.stylesheet.split("\n\n").collect();
    let new_blocks: Vec<&str> = after.stylesheet.split("\n\n").collect();
    assert_eq!(old_blocks.len(), new_blocks.len());
    let changed: Vec<usize> = (0..old_blocks.len())
        .filter(|&i| old_blocks[i] != new_blocks[i])
        .collect();
    assert_eq!(changed, vec![2]);
    assert!(new_blocks[2].contains("rebeccapurple"));
}

#[test]
fn subscriber_keeps_projection_live() {
    let mut editor = editor();
    let config = editor.configuration();
    let live = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&live);
    let _sub = editor.subscribe(move |_, items| {
        *sink.borrow_mut() = project(&config, items).stylesheet;
    });

    let item = editor.add_item(GridCell::new(3, 3)).unwrap();
    assert_eq!(*live.borrow(), editor.project().stylesheet);

    editor.apply(&GestureEvent::ResizeStart {
        item_id: item.id,
        pointer: Point::default(),
    });
    editor.apply(&GestureEvent::PointerMove {
        pointer: Point::new(0.0, 210.0),
    });
    assert!(live.borrow().contains("grid-row: 3 / 6;"));
    assert_eq!(*live.borrow(), editor.project().stylesheet);

    editor.remove_item(item.id);
    assert_eq!(*live.borrow(), editor.project().stylesheet);
}

#[test]
fn default_items_get_palette_colors_and_labels() {
    let settings = EditorSettings {
        grid: GridConfiguration::new(4, 4, 0).unwrap(),
        label_prefix: "Box".into(),
        ..EditorSettings::default()
    };
    let mut editor = GridEditor::new(settings);
    let first = editor.add_item(GridCell::new(1, 1)).unwrap();
    let second = editor.add_item(GridCell::new(1, 2)).unwrap();
    assert_eq!(first.label, "Box 1");
    assert_eq!(second.label, "Box 2");
    assert!(first.color.starts_with("hsl("));
}
