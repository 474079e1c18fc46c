//! Page CRUD and per-page history.

use crate::helpers::{
    TestEditorBuilder, assert_item_count, assert_rect_eq, at, drag, editor_with_shapes, rect_of,
};
use scratchpad::PageError;
use scratchpad::geometry::Rect;
use scratchpad::types::{ItemType, PagePatch};

#[test]
fn test_new_editor_has_one_page() {
    let (editor, _) = TestEditorBuilder::new().build();

    assert_eq!(editor.page_count(), 1);
    assert_eq!(editor.active_page().name, "Page 1");
}

#[test]
fn test_add_page_switches_to_empty_page() {
    let (mut editor, _) = editor_with_shapes(&[(0.0, 0.0, 50.0, 50.0)]);
    let first = editor.active_page_id().to_string();

    let second = editor.add_page();

    assert_eq!(editor.page_count(), 2);
    assert_eq!(editor.active_page_id(), second);
    assert_eq!(editor.active_page().name, "Page 2");
    assert_item_count(&editor, 0);

    editor.switch_page(&first).unwrap();
    assert_item_count(&editor, 1);
}

#[test]
fn test_history_is_per_page() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    let first = editor.active_page_id().to_string();
    drag(&mut editor, (120.0, 120.0), (220.0, 120.0));

    editor.add_page();
    assert!(!editor.can_undo(), "new page starts with its own empty history");
    editor.add_item(ItemType::Text, Rect::new(0.0, 0.0, 150.0, 40.0));
    editor.undo();
    assert_item_count(&editor, 0);

    editor.switch_page(&first).unwrap();
    assert!(editor.can_undo());
    editor.undo();
    assert_eq!(editor.item(ids[0]).unwrap().x, 100.0);
}

#[test]
fn test_switch_page_clears_selection() {
    let (mut editor, ids) = editor_with_shapes(&[(0.0, 0.0, 50.0, 50.0)]);
    let first = editor.active_page_id().to_string();
    editor.add_page();
    editor.switch_page(&first).unwrap();
    editor.select_items(&ids);

    let second = editor.pages().nth(1).unwrap().id.clone();
    editor.switch_page(&second).unwrap();

    assert!(editor.selection().is_empty());
}

#[test]
fn test_switch_to_unknown_page_fails() {
    let (mut editor, _) = TestEditorBuilder::new().build();

    let result = editor.switch_page("missing");
    assert_eq!(result, Err(PageError::UnknownPage("missing".to_string())));
}

#[test]
fn test_last_page_cannot_be_deleted() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let only = editor.active_page_id().to_string();

    assert_eq!(editor.delete_page(&only), Err(PageError::LastPage));
    assert_eq!(editor.page_count(), 1);
}

#[test]
fn test_delete_active_page_falls_back_to_first() {
    let (mut editor, _) = editor_with_shapes(&[(0.0, 0.0, 50.0, 50.0)]);
    let first = editor.active_page_id().to_string();
    let second = editor.add_page();

    editor.delete_page(&second).unwrap();

    assert_eq!(editor.page_count(), 1);
    assert_eq!(editor.active_page_id(), first);
    assert_item_count(&editor, 1);
}

#[test]
fn test_delete_earlier_page_keeps_active_page() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let first = editor.active_page_id().to_string();
    editor.add_page();
    let third = editor.add_page();

    editor.delete_page(&first).unwrap();

    assert_eq!(editor.active_page_id(), third);
    assert_eq!(editor.page_count(), 2);
}

#[test]
fn test_rename_page_is_undoable_on_that_page() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let id = editor.active_page_id().to_string();

    assert_eq!(editor.rename_page(&id, "  Moodboard  "), Ok(true));
    assert_eq!(editor.active_page().name, "Moodboard");

    editor.undo();
    assert_eq!(editor.active_page().name, "Page 1");
    editor.redo();
    assert_eq!(editor.active_page().name, "Moodboard");
}

#[test]
fn test_rename_page_rejects_blank_names() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let id = editor.active_page_id().to_string();

    assert_eq!(editor.rename_page(&id, "   "), Err(PageError::EmptyName));
    assert!(!editor.can_undo());
}

#[test]
fn test_update_inactive_page_records_in_its_history() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let first = editor.active_page_id().to_string();
    editor.add_page();

    let changed = editor
        .update_page(
            &first,
            PagePatch {
                background_color: Some("#ffffff".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(changed);
    assert!(!editor.can_undo(), "active page history is untouched");

    editor.switch_page(&first).unwrap();
    assert_eq!(editor.active_page().background_color, "#ffffff");
    editor.undo();
    assert_eq!(editor.active_page().background_color, "#2d2d2d");
}

#[test]
fn test_unchanged_page_patch_records_nothing() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let id = editor.active_page_id().to_string();

    assert_eq!(editor.rename_page(&id, "Page 1"), Ok(false));
    assert!(!editor.can_undo());
}

#[test]
fn test_page_change_mid_drag_reverts_live_move() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    let first = editor.active_page_id().to_string();
    editor.on_pointer_down(&at(120.0, 120.0));
    editor.on_pointer_move(&at(320.0, 120.0));

    editor.add_page();
    assert!(editor.interaction_state().is_idle());
    editor.on_pointer_up(&at(320.0, 120.0));
    editor.switch_page(&first).unwrap();

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert!(!editor.can_undo());
}

#[test]
fn test_switch_page_mid_resize_reverts_live_resize() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    let first = editor.active_page_id().to_string();
    editor.add_page();
    editor.switch_page(&first).unwrap();
    editor.select_items(&ids);

    // Bottom-right handle
    editor.on_pointer_down(&at(150.0, 150.0));
    editor.on_pointer_move(&at(250.0, 250.0));
    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 150.0, 150.0));

    let second = editor.pages().nth(1).unwrap().id.clone();
    editor.switch_page(&second).unwrap();
    editor.switch_page(&first).unwrap();

    assert_rect_eq(rect_of(&editor, ids[0]), (100.0, 100.0, 50.0, 50.0));
    assert!(!editor.can_undo());
}

#[test]
fn test_deleting_other_page_keeps_drag_going() {
    let (mut editor, ids) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    let first = editor.active_page_id().to_string();
    let second = editor.add_page();
    editor.switch_page(&first).unwrap();

    editor.on_pointer_down(&at(120.0, 120.0));
    editor.on_pointer_move(&at(320.0, 120.0));
    editor.delete_page(&second).unwrap();
    editor.on_pointer_up(&at(320.0, 120.0));

    assert_rect_eq(rect_of(&editor, ids[0]), (300.0, 100.0, 50.0, 50.0));
    assert!(editor.can_undo());
}

#[test]
fn test_deleting_active_page_mid_drag_cancels_gesture() {
    let (mut editor, _) = editor_with_shapes(&[(100.0, 100.0, 50.0, 50.0)]);
    let second = editor.add_page();
    editor.add_item(ItemType::Shape, Rect::new(100.0, 100.0, 50.0, 50.0));

    editor.on_pointer_down(&at(120.0, 120.0));
    editor.on_pointer_move(&at(320.0, 120.0));
    editor.delete_page(&second).unwrap();

    assert!(editor.interaction_state().is_idle());
    assert_eq!(editor.page_count(), 1);
    assert!(!editor.can_undo());
}
