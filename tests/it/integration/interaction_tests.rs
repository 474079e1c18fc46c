//! Pointer gesture tests: pan, drag, marquee, resize, draw.

use crate::helpers::{
    TestEditorBuilder, assert_item_count, assert_rect_eq, at, click, drag, editor_with_shapes, key,
    middle_at, rect_of, shift_at,
};
use scratchpad::geometry::{Point, Rect};
use scratchpad::input::{InteractionMode, Key, Modifiers, ScrollDelta, WheelEvent};
use scratchpad::types::{ItemType, ShapeType, Tool};

// ============================================================================
// Marquee & Click Selection
// ============================================================================

#[test]
fn test_marquee_selects_overlapping_items() {
    let (mut editor, ids) = editor_with_shapes(&[
        (10.0, 10.0, 50.0, 50.0),
        (280.0, 280.0, 50.0, 50.0),
        (1000.0, 1000.0, 50.0, 50.0),
    ]);

    editor.on_pointer_down(&at(0.0, 0.0));
    assert_eq!(editor.interaction_mode(), InteractionMode::MarqueeSelect);
    editor.on_pointer_move(&at(300.0, 300.0));
    assert_eq!(editor.marquee_rect(), Some(Rect::new(0.0, 0.0, 300.0, 300.0)));
    editor.on_pointer_up(&at(300.0, 300.0));

    assert_eq!(editor.selection(), &[ids[0], ids[1]]);
    assert!(editor.interaction_state().is_idle());
    assert!(!editor.can_undo(), "selection is not recorded");
}

#[test]
fn test_marquee_requires_strict_overlap() {
    let (mut editor, _) = editor_with_shapes(&[(300.0, 0.0, 50.0, 50.0)]);

    drag(&mut editor, (0.0, 0.0), (300.0, 300.0));
    assert!(editor.selection().is_empty(), "touching edges do not overlap");
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    editor.select_items(&ids);

    // Under the drag threshold: a click, not a marquee
    editor.on_pointer_down(&at(500.0, 500.0));
    editor.on_pointer_move(&at(502.0, 501.0));
    editor.on_pointer_up(&at(502.0, 501.0));

    assert!(editor.selection().is_empty());
}

#[test]
fn test_shift_marquee_adds_to_selection() {
    let (mut editor, ids) =
        editor_with_shapes(&[(10.0, 10.0, 50.0, 50.0), (400.0, 400.0, 50.0, 50.0)]);
    editor.select_items(&[ids[1]]);

    editor.on_pointer_down(&shift_at(0.0, 0.0));
    editor.on_pointer_move(&shift_at(100.0, 100.0));
    editor.on_pointer_up(&shift_at(100.0, 100.0));

    assert_eq!(editor.selection(), &[ids[1], ids[0]]);
}

#[test]
fn test_shift_click_toggles_membership() {
    let (mut editor, ids) = editor_with_shapes(&[(0.0, 0.0, 50.0, 50.0), (100.0, 0.0, 50.0, 50.0)]);

    click(&mut editor, 25.0, 25.0);
    assert_eq!(editor.selection(), &[ids[0]]);

    editor.on_pointer_down(&shift_at(125.0, 25.0));
    editor.on_pointer_up(&shift_at(125.0, 25.0));
    assert_eq!(editor.selection(), &[ids[0], ids[1]]);

    editor.on_pointer_down(&shift_at(25.0, 25.0));
    assert!(editor.interaction_state().is_idle(), "deselecting does not start a drag");
    editor.on_pointer_up(&shift_at(25.0, 25.0));
    assert_eq!(editor.selection(), &[ids[1]]);
}

#[test]
fn test_click_on_selected_item_collapses_multi_selection() {
    let (mut editor, ids) = editor_with_shapes(&[(0.0, 0.0, 50.0, 50.0), (100.0, 0.0, 50.0, 50.0)]);
    editor.select_items(&ids);

    click(&mut editor, 125.0, 25.0);
    assert_eq!(editor.selection(), &[ids[1]]);
    assert!(!editor.can_undo());
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn test_drag_moves_whole_selection() {
    let (mut editor, ids) = editor_with_shapes(&[(0.0, 0.0, 50.0, 50.0), (100.0, 0.0, 50.0, 50.0)]);
    editor.select_items(&ids);

    drag(&mut editor, (25.0, 25.0), (75.0, 125.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (50.0, 100.0, 50.0, 50.0));
    assert_rect_eq(rect_of(&editor, ids[1]), (150.0, 100.0, 50.0, 50.0));
    assert_eq!(editor.selection(), &ids[..], "drag keeps the multi-selection");
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_drag_below_threshold_is_a_click() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);

    drag(&mut editor, (120.0, 120.0), (122.0, 121.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert_eq!(editor.selection(), &[ids[0]]);
    assert!(!editor.can_undo());
}

#[test]
fn test_drag_back_to_start_records_nothing() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);

    editor.on_pointer_down(&at(120.0, 120.0));
    editor.on_pointer_move(&at(200.0, 200.0));
    editor.on_pointer_move(&at(120.0, 120.0));
    editor.on_pointer_up(&at(120.0, 120.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert!(!editor.can_undo());
}

#[test]
fn test_locked_item_cannot_be_dragged() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_locked_item(ItemType::Shape, (100.0, 100.0, 50.0, 50.0))
        .build();

    drag(&mut editor, (120.0, 120.0), (300.0, 300.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert!(!editor.can_undo());
    assert!(editor.selection().is_empty());
}

#[test]
fn test_hidden_item_is_not_hit() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    editor.toggle_visibility(ids[0]);
    editor.clear_history();

    drag(&mut editor, (120.0, 120.0), (300.0, 300.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert!(!editor.can_undo());
}

#[test]
fn test_drag_onto_frame_adopts_item() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_item(ItemType::Frame, (0.0, 0.0, 500.0, 300.0))
        .with_item(ItemType::Shape, (600.0, 100.0, 50.0, 50.0))
        .build();
    let (frame, shape) = (ids[0], ids[1]);

    drag(&mut editor, (620.0, 120.0), (320.0, 120.0));

    assert_eq!(editor.item(shape).unwrap().parent_id, Some(frame));
    assert_eq!(editor.item(frame).unwrap().child_ids, vec![shape]);
    assert_eq!(editor.history().len(), 1, "move and adoption are one command");

    editor.undo();
    assert_eq!(editor.item(shape).unwrap().parent_id, None);
    assert!(editor.item(frame).unwrap().child_ids.is_empty());
    assert_rect_eq(rect_of(&editor, shape), (600.0, 100.0, 50.0, 50.0));

    editor.redo();
    assert_eq!(editor.item(shape).unwrap().parent_id, Some(frame));
    assert_rect_eq(rect_of(&editor, shape), (300.0, 100.0, 50.0, 50.0));
}

#[test]
fn test_dragging_frame_moves_members() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_item(ItemType::Frame, (0.0, 0.0, 500.0, 300.0))
        .with_item(ItemType::Shape, (600.0, 100.0, 50.0, 50.0))
        .build();
    let (frame, shape) = (ids[0], ids[1]);
    drag(&mut editor, (620.0, 120.0), (320.0, 120.0));

    // Pressing a member grabs its frame
    drag(&mut editor, (320.0, 120.0), (420.0, 170.0));

    assert_eq!(editor.selection(), &[frame]);
    assert_rect_eq(rect_of(&editor, frame), (100.0, 50.0, 500.0, 300.0));
    assert_rect_eq(rect_of(&editor, shape), (400.0, 150.0, 50.0, 50.0));
    assert_eq!(editor.item(shape).unwrap().parent_id, Some(frame));
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn test_resize_from_corner_handle() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    editor.select_items(&ids);

    editor.on_pointer_down(&at(150.0, 150.0));
    assert_eq!(editor.interaction_mode(), InteractionMode::ResizingItem);
    editor.on_pointer_move(&at(200.0, 170.0));
    editor.on_pointer_up(&at(200.0, 170.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 100.0, 70.0));
    editor.undo();
    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
}

#[test]
fn test_resize_from_left_edge_clamps_at_minimum() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    editor.select_items(&ids);

    drag(&mut editor, (100.0, 125.0), (400.0, 125.0));

    // Right edge stays anchored while the width floors at 10
    assert_rect_eq(rect_of(&editor, ids[0]), (140.0, 100.0, 10.0, 50.0));
}

#[test]
fn test_resize_with_shift_keeps_aspect_ratio() {
    let (mut editor, ids) = editor_with_shapes(&[(0.0, 0.0, 100.0, 50.0)]);
    editor.select_items(&ids);

    editor.on_pointer_down(&at(100.0, 50.0));
    editor.on_pointer_move(&shift_at(200.0, 60.0));
    editor.on_pointer_up(&shift_at(200.0, 60.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (0.0, 0.0, 200.0, 100.0));
}

#[test]
fn test_resize_of_locked_item_never_starts() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_locked_item(ItemType::Shape, (100.0, 100.0, 50.0, 50.0))
        .build();
    editor.select_items(&ids);

    drag(&mut editor, (150.0, 150.0), (250.0, 250.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert!(!editor.can_undo());
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_draw_creates_item_and_reverts_tool() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    editor.set_tool(Tool::Shape(ShapeType::Ellipse));

    drag(&mut editor, (300.0, 200.0), (100.0, 100.0));

    assert_item_count(&editor, 1);
    let item = &editor.items()[0];
    assert_eq!(item.item_type, ItemType::Shape);
    assert_eq!(item.shape_type, ShapeType::Ellipse);
    assert_rect_eq(item.rect(), (100.0, 100.0, 200.0, 100.0));
    assert_eq!(editor.selection(), &[item.id]);
    assert_eq!(editor.tool(), Tool::Select);

    editor.undo();
    assert_item_count(&editor, 0);
}

#[test]
fn test_tiny_draw_is_discarded() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    editor.set_tool(Tool::Frame);

    editor.on_pointer_down(&at(10.0, 10.0));
    assert_eq!(editor.interaction_mode(), InteractionMode::Drawing);
    editor.on_pointer_move(&at(12.0, 11.0));
    editor.on_pointer_up(&at(12.0, 11.0));

    assert_item_count(&editor, 0);
    assert!(!editor.can_undo());
    assert_eq!(editor.tool(), Tool::Select);
}

#[test]
fn test_drawing_over_an_item_does_not_select_it() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    editor.select_items(&ids);
    editor.set_tool(Tool::StickyNote);

    drag(&mut editor, (110.0, 110.0), (400.0, 400.0));

    assert_item_count(&editor, 2);
    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    let note = editor.items()[1].id;
    assert_eq!(editor.selection(), &[note]);
    assert_eq!(editor.item(note).unwrap().item_type, ItemType::StickyNote);
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn test_space_drag_pans_camera() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);

    editor.on_key_down(&key(Key::Space));
    drag(&mut editor, (120.0, 120.0), (170.0, 150.0));
    editor.on_key_up(&key(Key::Space));

    assert_eq!(editor.camera().offset, Point::new(50.0, 30.0));
    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert!(!editor.can_undo());
    assert!(!editor.is_space_pressed());
}

#[test]
fn test_middle_button_pans_and_world_mapping_follows() {
    let (mut editor, _) = TestEditorBuilder::new().build();

    editor.on_pointer_down(&middle_at(0.0, 0.0));
    assert_eq!(editor.interaction_mode(), InteractionMode::Panning);
    editor.on_pointer_move(&middle_at(-40.0, 10.0));
    editor.on_pointer_up(&middle_at(-40.0, 10.0));

    assert_eq!(editor.screen_to_world(Point::new(0.0, 0.0)), Point::new(40.0, -10.0));
}

#[test]
fn test_pan_tool_pans_over_items() {
    let (mut editor, ids) = editor_with_shapes(&[(0.0, 0.0, 200.0, 200.0)]);
    editor.set_tool(Tool::Pan);

    drag(&mut editor, (100.0, 100.0), (110.0, 100.0));

    assert_eq!(editor.camera().offset, Point::new(10.0, 0.0));
    assert_rect_eq(rect_of(&editor, ids[0]), (0.0, 0.0, 200.0, 200.0));
}

#[test]
fn test_wheel_zooms_about_pointer() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let pivot = Point::new(300.0, 200.0);
    let before = editor.screen_to_world(pivot);

    let changed = editor.on_wheel(&WheelEvent {
        position: pivot,
        delta: ScrollDelta::Pixels(Point::new(0.0, -100.0)),
        modifiers: Modifiers::NONE,
    });

    assert!(changed);
    assert!((editor.camera().zoom - 1.1).abs() < 1e-4);
    let after = editor.screen_to_world(pivot);
    assert!((after.x - before.x).abs() < 1e-3 && (after.y - before.y).abs() < 1e-3);
}

#[test]
fn test_wheel_pans_when_configured() {
    let mut settings = scratchpad::EditorSettings::default();
    settings.wheel_pans = true;
    let (mut editor, _) = TestEditorBuilder::new().with_settings(settings).build();

    editor.on_wheel(&WheelEvent {
        position: Point::ZERO,
        delta: ScrollDelta::Lines(Point::new(1.0, -2.0)),
        modifiers: Modifiers::NONE,
    });

    assert_eq!(editor.camera().offset, Point::new(20.0, -40.0));
    assert_eq!(editor.camera().zoom, 1.0);
}

#[test]
fn test_drag_under_zoom_uses_world_delta() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    editor.on_wheel(&WheelEvent {
        position: Point::ZERO,
        delta: ScrollDelta::Pixels(Point::new(0.0, -1000.0)),
        modifiers: Modifiers::NONE,
    });
    assert_eq!(editor.camera().zoom, 2.0);

    // Item spans 200..300 on screen now; 100 screen px is 50 world units
    drag(&mut editor, (250.0, 250.0), (350.0, 250.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (150.0, 100.0, 50.0, 50.0));
}
