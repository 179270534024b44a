use seatplan_core::{
    CategoryDeletePolicy, CategoryId, Element, ElementId, ElementPatch, Point, Row, RowPatch,
    SeatPlan, SeatStatus, Text, ZoneShape,
};
use seatplan_session::{
    Click, Editor, EditorConfig, Key, KeyInput, Modifiers, ResizeMode, Tool, TransformGesture,
    Wheel,
};

fn id(s: &str) -> ElementId {
    ElementId::new(s)
}

fn row_a() -> Row {
    Row::new(id("row-a"), "A", Point::new(100.0, 200.0), CategoryId::new("standard"))
        .with_spacing(25.0)
        .with_seats(5)
}

/// Default plan with row A (5 seats) committed
fn editor_with_row_a() -> Editor {
    let mut editor = Editor::default();
    assert!(editor.add_element(Element::Row(row_a())));
    editor
}

fn seat_center(editor: &Editor, seat: &str) -> Point {
    editor
        .store()
        .element(&id(seat))
        .and_then(Element::as_seat)
        .map(|s| s.center())
        .unwrap()
}

#[test]
fn add_row_scenario() {
    let editor = editor_with_row_a();
    let plan = editor.plan();
    assert_eq!(plan.rows().count(), 1);
    assert_eq!(plan.seats().count(), 5);
    assert_eq!(seat_center(&editor, "row-a-seat-3"), Point::new(150.0, 200.0));
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn seat_click_selects_row_and_double_click_selects_seat() {
    let mut editor = editor_with_row_a();
    let seat_pos = Point::new(150.0, 200.0);

    editor.click(&Click::at(seat_pos));
    assert_eq!(editor.selection(), &[id("row-a")]);

    editor.click(&Click::at(seat_pos).double());
    assert_eq!(editor.selection(), &[id("row-a-seat-3")]);

    editor.direct_select(&id("row-a-seat-1"));
    assert_eq!(editor.selection(), &[id("row-a-seat-1")]);
}

#[test]
fn modifier_click_on_seat_toggles_row() {
    let mut editor = editor_with_row_a();
    let text = Text::new(id("t"), "Exit", Point::new(500.0, 500.0));
    editor.add_element(Element::Text(text));

    editor.click(&Click::at(Point::new(505.0, 505.0)));
    assert_eq!(editor.selection(), &[id("t")]);

    let seat_click = Click::at(Point::new(100.0, 200.0)).with_modifiers(Modifiers::shift());
    editor.click(&seat_click);
    assert_eq!(editor.selection(), &[id("t"), id("row-a")]);

    editor.click(&seat_click);
    assert_eq!(editor.selection(), &[id("t")]);
}

#[test]
fn empty_click_clears_unless_modified() {
    let mut editor = editor_with_row_a();
    editor.click(&Click::at(Point::new(100.0, 200.0)));
    assert!(!editor.selection().is_empty());

    editor.click(&Click::at(Point::new(900.0, 700.0)).with_modifiers(Modifiers::ctrl()));
    assert_eq!(editor.selection(), &[id("row-a")]);

    editor.click(&Click::at(Point::new(900.0, 700.0)));
    assert!(editor.selection().is_empty());
}

#[test]
fn explicit_target_skips_hit_test() {
    let mut editor = editor_with_row_a();
    editor.click(&Click::at(Point::new(0.0, 0.0)).on(id("row-a-seat-2")));
    assert_eq!(editor.selection(), &[id("row-a")]);
}

#[test]
fn drag_row_scenario() {
    let mut editor = editor_with_row_a();
    editor.click(&Click::at(Point::new(0.0, 0.0)).on(id("row-a")));
    let before: Vec<Point> = (1..=5)
        .map(|n| seat_center(&editor, &format!("row-a-seat-{n}")))
        .collect();
    let entries = editor.history().len();

    assert!(editor.pointer_down(Point::new(125.0, 200.0), Modifiers::NONE));
    editor.pointer_move(Point::new(130.0, 198.0));
    editor.pointer_move(Point::new(133.0, 196.0));
    editor.pointer_up(Point::new(135.0, 195.0));

    let row = editor.store().row(&id("row-a")).unwrap();
    assert_eq!(row.origin, Point::new(110.0, 195.0));
    for (n, old) in (1..=5).zip(&before) {
        let new = seat_center(&editor, &format!("row-a-seat-{n}"));
        assert!((new.x - old.x - 10.0).abs() < 1e-9);
        assert!((new.y - old.y + 5.0).abs() < 1e-9);
    }
    assert_eq!(editor.history().len(), entries + 1);
    assert!(editor.gesture().is_none());
}

#[test]
fn dragging_a_row_wider_than_the_limits_keeps_every_seat() {
    let wide = Row::new(id("row-w"), "W", Point::new(0.0, 100.0), CategoryId::new("standard"))
        .with_spacing(60.0)
        .with_seats(60);
    let mut plan = SeatPlan::new_default();
    let seats = wide.generate_seats(&[]);
    plan.elements.push(Element::Row(wide));
    plan.elements.extend(seats.into_iter().map(Element::Seat));
    let mut editor = Editor::with_plan(plan, EditorConfig::default());

    editor.click(&Click::at(Point::new(0.0, 0.0)).on(id("row-w")));
    assert!(editor.pointer_down(Point::new(0.0, 100.0), Modifiers::NONE));
    editor.pointer_up(Point::new(10.0, 95.0));

    let row = editor.store().row(&id("row-w")).unwrap();
    assert_eq!(row.origin, Point::new(10.0, 95.0));
    assert_eq!(row.seat_count, 60);
    assert_eq!(row.spacing, 60.0);
    assert_eq!(editor.plan().seats().count(), 60);
    editor.plan().validate().unwrap();
}

#[test]
fn drag_of_unselected_seat_is_rejected() {
    let mut editor = editor_with_row_a();
    assert!(!editor.pointer_down(Point::new(125.0, 200.0), Modifiers::NONE));
    assert!(editor.gesture().is_none());
    assert_eq!(seat_center(&editor, "row-a-seat-2"), Point::new(125.0, 200.0));
}

#[test]
fn drag_without_movement_records_nothing() {
    let mut editor = editor_with_row_a();
    editor.click(&Click::at(Point::new(100.0, 200.0)));
    let entries = editor.history().len();
    assert!(editor.pointer_down(Point::new(100.0, 200.0), Modifiers::NONE));
    editor.pointer_up(Point::new(100.0, 200.0));
    assert_eq!(editor.history().len(), entries);
}

#[test]
fn escape_during_drag_rolls_back() {
    let mut editor = editor_with_row_a();
    editor.click(&Click::at(Point::new(100.0, 200.0)));
    editor.pointer_down(Point::new(100.0, 200.0), Modifiers::NONE);
    editor.pointer_move(Point::new(150.0, 250.0));
    assert_eq!(seat_center(&editor, "row-a-seat-1"), Point::new(150.0, 250.0));

    editor.escape();
    assert_eq!(seat_center(&editor, "row-a-seat-1"), Point::new(100.0, 200.0));
    assert!(editor.selection().is_empty());
    assert_eq!(editor.tool(), Tool::Select);
}

#[test]
fn marquee_redirects_seats_to_rows() {
    let mut editor = editor_with_row_a();
    assert!(editor.pointer_down(Point::new(90.0, 150.0), Modifiers::NONE));
    editor.pointer_move(Point::new(140.0, 260.0));
    let rect = editor.marquee_rect().unwrap();
    assert_eq!(rect.width(), 50.0);
    editor.pointer_up(Point::new(140.0, 260.0));
    assert_eq!(editor.selection(), &[id("row-a")]);
    assert!(editor.marquee_rect().is_none());
}

#[test]
fn marquee_union_and_clear() {
    let mut editor = editor_with_row_a();
    editor.add_element(Element::Text(Text::new(id("t"), "Hi", Point::new(600.0, 600.0))));
    editor.click(&Click::at(Point::new(605.0, 605.0)));

    // Start just outside seat 1 so the press is not a drag
    assert!(editor.pointer_down(Point::new(85.0, 185.0), Modifiers::shift()));
    editor.pointer_up(Point::new(105.0, 205.0));
    assert_eq!(editor.selection(), &[id("t"), id("row-a")]);

    editor.pointer_down(Point::new(1000.0, 700.0), Modifiers::NONE);
    editor.pointer_up(Point::new(1010.0, 710.0));
    assert!(editor.selection().is_empty());
}

#[test]
fn placement_tools_create_and_revert_to_select() {
    let mut editor = Editor::default();

    editor.set_tool(Tool::AddRow);
    editor.click(&Click::at(Point::new(50.0, 60.0)));
    assert_eq!(editor.tool(), Tool::Select);
    let row = editor.plan().rows().next().unwrap().clone();
    assert_eq!(row.label, "A");
    assert_eq!(row.seat_count, 10);
    assert_eq!(row.spacing, 25.0);
    assert_eq!(row.origin, Point::new(50.0, 60.0));
    assert_eq!(editor.selection(), &[row.id.clone()]);
    assert_eq!(editor.plan().seats_of(&row.id).count(), 10);

    editor.set_tool(Tool::AddRow);
    editor.click(&Click::at(Point::new(50.0, 120.0)));
    let labels: Vec<_> = editor.plan().rows().map(|r| r.label.clone()).collect();
    assert_eq!(labels, vec!["A", "B"]);

    editor.set_tool(Tool::AddText);
    editor.click(&Click::at(Point::new(10.0, 10.0)));
    let text = editor
        .plan()
        .elements
        .iter()
        .find_map(Element::as_text)
        .unwrap();
    assert_eq!(text.text, "New text");
    assert_eq!(text.font_size, Some(16.0));
    assert_eq!(text.font_family.as_deref(), Some("Arial"));
    assert_eq!(text.color.as_deref(), Some("#111827"));

    editor.set_tool(Tool::AddZone);
    editor.click(&Click::at(Point::new(300.0, 300.0)));
    let zone = editor
        .plan()
        .elements
        .iter()
        .find_map(Element::as_zone)
        .unwrap();
    assert_eq!(zone.shape, ZoneShape::Rect);
    assert_eq!(zone.points, vec![Point::new(250.0, 250.0), Point::new(350.0, 350.0)]);

    assert_eq!(editor.history().len(), 5);
}

#[test]
fn leaving_select_tool_clears_selection() {
    let mut editor = editor_with_row_a();
    editor.click(&Click::at(Point::new(100.0, 200.0)));
    editor.set_tool(Tool::Pan);
    assert!(editor.selection().is_empty());
    editor.click(&Click::at(Point::new(10.0, 10.0)));
    assert_eq!(editor.plan().elements.len(), 6);
}

#[test]
fn pan_tool_drags_the_view() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Pan);
    assert!(editor.pointer_down(Point::new(10.0, 10.0), Modifiers::NONE));
    editor.pointer_move(Point::new(30.0, 5.0));
    editor.pointer_up(Point::new(40.0, 0.0));
    assert_eq!(editor.store().pan(), Point::new(30.0, -10.0));
    assert_eq!(editor.history().len(), 1);
    assert!(!editor.is_modified());
}

#[test]
fn clicks_follow_the_view_transform() {
    let mut editor = editor_with_row_a();
    editor.set_tool(Tool::Pan);
    editor.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
    editor.pointer_up(Point::new(50.0, 0.0));
    editor.set_tool(Tool::Select);

    // Seat 1 sits at canvas (100, 200), now drawn at screen (150, 200)
    editor.click(&Click::at(Point::new(150.0, 200.0)));
    assert_eq!(editor.selection(), &[id("row-a")]);
}

#[test]
fn undo_redo_restores_and_keeps_view() {
    let mut editor = editor_with_row_a();
    editor.click(&Click::at(Point::new(100.0, 200.0)));
    editor.delete_selection();
    assert!(editor.plan().elements.is_empty());

    editor.zoom_in();
    let zoom = editor.store().zoom();

    assert!(editor.undo());
    assert_eq!(editor.plan().elements.len(), 6);
    assert!(editor.selection().is_empty());
    assert_eq!(editor.store().zoom(), zoom);

    assert!(editor.undo());
    assert!(editor.plan().elements.is_empty());
    assert!(!editor.undo());

    assert!(editor.redo());
    assert!(editor.redo());
    assert!(editor.plan().elements.is_empty());
    assert!(!editor.redo());
}

#[test]
fn edits_after_undo_drop_redo() {
    let mut editor = editor_with_row_a();
    editor.undo();
    assert!(editor.can_redo());
    editor.add_element(Element::Text(Text::new(id("t"), "Hi", Point::new(0.0, 0.0))));
    assert!(!editor.can_redo());
}

#[test]
fn undo_everything_restores_original() {
    let mut editor = Editor::with_plan(SeatPlan::sample(), EditorConfig::default());
    let original = editor.plan().elements.clone();

    editor.edit_row(
        &id("row-vip"),
        &RowPatch {
            curvature: Some(-20.0),
            seat_count: Some(9),
            ..Default::default()
        },
    );
    editor.edit_element(
        &id("row-a-seat-1"),
        &ElementPatch {
            status: Some(SeatStatus::Unavailable),
            ..Default::default()
        },
    );
    editor.click(&Click::at(Point::new(0.0, 0.0)).on(id("stage")));
    editor.delete_selection();
    editor.delete_category(&CategoryId::new("balcon"));

    let mut steps = 0;
    while editor.undo() {
        steps += 1;
    }
    assert_eq!(steps, 4);
    assert_eq!(editor.plan().elements, original);
}

#[test]
fn override_survives_row_edit() {
    let mut editor = editor_with_row_a();
    editor.edit_element(
        &id("row-a-seat-2"),
        &ElementPatch {
            status: Some(SeatStatus::Unavailable),
            x: Some(999.0),
            ..Default::default()
        },
    );
    editor.edit_row(
        &id("row-a"),
        &RowPatch {
            spacing: Some(40.0),
            label: Some("Z".into()),
            ..Default::default()
        },
    );
    let seat = editor
        .store()
        .element(&id("row-a-seat-2"))
        .and_then(Element::as_seat)
        .unwrap();
    assert_eq!(seat.status, SeatStatus::Unavailable);
    assert_eq!(seat.center(), Point::new(140.0, 200.0));
    assert_eq!(seat.label.as_deref(), Some("Z2"));
}

#[test]
fn delete_selection_skips_lone_derived_seat() {
    let mut editor = editor_with_row_a();
    editor.direct_select(&id("row-a-seat-3"));
    assert_eq!(editor.delete_selection(), 0);
    assert_eq!(editor.plan().seats().count(), 5);
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn last_category_scenario() {
    let mut editor = Editor::default();
    assert!(editor.delete_category(&CategoryId::new("premium")));
    assert!(editor.delete_category(&CategoryId::new("vip")));
    assert!(!editor.delete_category(&CategoryId::new("standard")));
    assert_eq!(editor.store().categories().count(), 1);
}

#[test]
fn category_policy_comes_from_config() {
    let config = EditorConfig {
        category_delete_policy: CategoryDeletePolicy::RemoveElements,
        ..Default::default()
    };
    let mut editor = Editor::new(config);
    editor.add_element(Element::Row(row_a()));
    assert!(editor.delete_category(&CategoryId::new("standard")));
    assert!(editor.plan().elements.is_empty());
}

#[test]
fn transform_end_is_one_history_entry() {
    let mut editor = Editor::with_plan(SeatPlan::sample(), EditorConfig::default());
    let entries = editor.history().len();
    let title = editor.store().element(&id("title")).cloned().unwrap();
    let Element::Text(title) = title else {
        panic!("title is text");
    };

    let changed = editor.transform_end(&[
        (
            id("title"),
            TransformGesture::at(title.x, title.y, 100.0, 24.0).scaled(2.0, 2.0),
        ),
        (
            id("stage"),
            TransformGesture::at(400.0, 100.0, 300.0, 100.0).scaled(1.0, 1.5),
        ),
        (
            id("row-a-seat-1"),
            TransformGesture::at(0.0, 0.0, 30.0, 30.0).rotated(90.0),
        ),
    ]);
    assert!(changed);
    assert_eq!(editor.history().len(), entries + 1);

    let text = editor.store().element(&id("title")).and_then(Element::as_text).unwrap();
    assert_eq!(text.font_size, Some(48.0));
    let zone = editor.store().element(&id("stage")).and_then(Element::as_zone).unwrap();
    assert_eq!(zone.points[1], Point::new(700.0, 250.0));
    let seat = editor.store().element(&id("row-a-seat-1")).and_then(Element::as_seat).unwrap();
    assert_eq!(seat.center(), Point::new(100.0, 200.0));
}

#[test]
fn row_rotation_regenerates_seats() {
    let mut editor = editor_with_row_a();
    let centroid = editor.store().row(&id("row-a")).unwrap().centroid();
    editor.transform_end(&[(
        id("row-a"),
        TransformGesture::at(centroid.x, centroid.y, 0.0, 0.0).rotated(90.0),
    )]);
    let row = editor.store().row(&id("row-a")).unwrap();
    assert_eq!(row.orientation, 90.0);
    let seat = seat_center(&editor, "row-a-seat-3");
    assert!((seat.x - centroid.x).abs() < 1e-9);
    assert!((seat.y - centroid.y).abs() < 1e-9);
    let seats: Vec<_> = editor.store().seats_of(&id("row-a")).collect();
    assert!(seats.iter().all(|s| s.rotation == Some(90.0)));
}

#[test]
fn affordance_follows_selection() {
    let mut editor = editor_with_row_a();
    assert!(!editor.affordance().is_active());
    editor.click(&Click::at(Point::new(100.0, 200.0)));
    let aff = editor.affordance();
    assert_eq!(aff.resize, ResizeMode::None);
    assert!(aff.rotate);
    editor.click(&Click::at(Point::new(100.0, 200.0)).double());
    assert!(!editor.affordance().is_active());
}

#[test]
fn keyboard_shortcuts() {
    let mut editor = editor_with_row_a();
    let ctrl = |c| KeyInput::new(Key::Char(c), Modifiers::ctrl());

    assert!(editor.handle_key(KeyInput::plain(Key::Char('r'))));
    assert_eq!(editor.tool(), Tool::AddRow);
    assert!(editor.handle_key(KeyInput::plain(Key::Escape)));
    assert_eq!(editor.tool(), Tool::Select);
    assert!(!editor.handle_key(KeyInput::plain(Key::Char('q'))));

    assert!(editor.handle_key(ctrl('a')));
    assert_eq!(editor.selection(), &[id("row-a")]);
    assert!(editor.handle_key(KeyInput::plain(Key::Delete)));
    assert!(editor.plan().elements.is_empty());

    assert!(editor.handle_key(ctrl('z')));
    assert_eq!(editor.plan().elements.len(), 6);
    assert!(editor.handle_key(KeyInput::new(Key::Char('Z'), Modifiers::ctrl_shift())));
    assert!(editor.plan().elements.is_empty());
    editor.handle_key(ctrl('z'));
    assert!(editor.handle_key(ctrl('y')));
    assert!(editor.plan().elements.is_empty());

    editor.handle_key(ctrl('='));
    assert!((editor.store().zoom() - 1.2).abs() < 1e-12);
    editor.handle_key(ctrl('-'));
    editor.handle_key(ctrl('-'));
    assert!((editor.store().zoom() - 1.0 / 1.2).abs() < 1e-12);
    editor.handle_key(ctrl('0'));
    assert_eq!(editor.store().zoom(), 1.0);
}

#[test]
fn zoom_is_clamped() {
    let mut editor = Editor::default();
    for _ in 0..50 {
        editor.zoom_in();
    }
    assert_eq!(editor.store().zoom(), 5.0);
    for _ in 0..100 {
        editor.zoom_out();
    }
    assert_eq!(editor.store().zoom(), 0.1);
}

#[test]
fn wheel_zooms_toward_pointer_or_pans() {
    let mut editor = Editor::default();
    let pos = Point::new(300.0, 200.0);
    let before = editor.plan().meta.screen_to_canvas(pos);
    editor.wheel(&Wheel {
        pos,
        delta_x: 0.0,
        delta_y: -100.0,
        modifiers: Modifiers::NONE,
    });
    assert!((editor.store().zoom() - 1.2).abs() < 1e-12);
    let after = editor.plan().meta.screen_to_canvas(pos);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);

    let pan = editor.store().pan();
    editor.wheel(&Wheel {
        pos,
        delta_x: 0.0,
        delta_y: 40.0,
        modifiers: Modifiers::shift(),
    });
    assert_eq!(editor.store().pan(), pan.translated(0.0, -40.0));
    assert!((editor.store().zoom() - 1.2).abs() < 1e-12);
}

#[test]
fn set_plan_resets_history() {
    let mut editor = editor_with_row_a();
    assert!(editor.can_undo());
    editor.set_plan(SeatPlan::sample());
    assert!(!editor.can_undo());
    assert_eq!(editor.history().len(), 1);
    assert!(!editor.is_modified());
}
