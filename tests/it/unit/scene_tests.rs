//! Scene model structural operations.

use crate::helpers::assert_parent_child_consistent;
use scratchpad::SceneError;
use scratchpad::geometry::{Point, Rect};
use scratchpad::scene::Scene;
use scratchpad::types::{Item, ItemId, ItemPatch, ItemType};

fn item(id: ItemId, item_type: ItemType, x: f32, y: f32) -> Item {
    Item::new(id, item_type, Rect::new(x, y, 50.0, 50.0))
}

/// Frame 1 holding group 2, which holds shapes 3 and 4; shape 5 is loose.
fn nested_scene() -> Scene {
    let mut frame = item(1, ItemType::Frame, 0.0, 0.0);
    frame.child_ids = vec![2];
    let mut group = item(2, ItemType::Group, 0.0, 0.0);
    group.parent_id = Some(1);
    group.child_ids = vec![3, 4];
    let mut a = item(3, ItemType::Shape, 0.0, 0.0);
    a.parent_id = Some(2);
    let mut b = item(4, ItemType::Shape, 20.0, 0.0);
    b.parent_id = Some(2);
    let loose = item(5, ItemType::Shape, 300.0, 0.0);

    Scene::from_items(vec![frame, group, a, b, loose]).unwrap()
}

#[test]
fn test_add_rejects_duplicates_atomically() {
    let mut scene = Scene::from_items(vec![item(1, ItemType::Shape, 0.0, 0.0)]).unwrap();

    let result = scene.add_items(vec![
        item(2, ItemType::Shape, 0.0, 0.0),
        item(1, ItemType::Text, 0.0, 0.0),
    ]);

    assert_eq!(result, Err(SceneError::DuplicateItem(1)));
    assert_eq!(scene.len(), 1);
    assert!(!scene.contains(2));
}

#[test]
fn test_hierarchy_queries() {
    let scene = nested_scene();

    assert_eq!(scene.ancestors(3), vec![2, 1]);
    assert!(scene.is_descendant_of(4, 1));
    assert!(!scene.is_descendant_of(5, 1));
    assert_eq!(scene.descendants(1), vec![2, 3, 4]);
    assert_eq!(scene.siblings(None), vec![1, 5]);
    assert_eq!(scene.siblings(Some(2)), vec![3, 4]);
    assert_eq!(scene.with_descendants(&[2, 5]), vec![2, 3, 4, 5]);
}

#[test]
fn test_remove_cascades_to_descendants() {
    let mut scene = nested_scene();

    let removed = scene.remove_items(&[2]);

    let removed_ids: Vec<ItemId> = removed.iter().map(|e| e.item.id).collect();
    assert_eq!(removed_ids, vec![2, 3, 4]);
    assert_eq!(removed.iter().map(|e| e.index).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(scene.order(), vec![1, 5]);
    assert!(scene.get(1).unwrap().child_ids.is_empty());
    assert_parent_child_consistent(&scene);
}

#[test]
fn test_restore_puts_items_back_in_place() {
    let mut scene = nested_scene();
    let original = scene.items().to_vec();

    let removed = scene.remove_items(&[2]);
    scene.restore(&removed).unwrap();
    scene.replace(original[0].clone()).unwrap();

    assert_eq!(scene.items(), original.as_slice());
}

#[test]
fn test_reparent_updates_both_sides() {
    let mut scene = nested_scene();

    scene.reparent(5, Some(1)).unwrap();
    assert_eq!(scene.parent(5), Some(1));
    assert_eq!(scene.get(1).unwrap().child_ids, vec![2, 5]);

    scene.reparent(3, None).unwrap();
    assert_eq!(scene.parent(3), None);
    assert_eq!(scene.get(2).unwrap().child_ids, vec![4]);
    assert_parent_child_consistent(&scene);
}

#[test]
fn test_reparent_rejects_cycles() {
    let mut scene = nested_scene();

    assert_eq!(scene.reparent(1, Some(2)), Err(SceneError::Cycle { child: 1, parent: 2 }));
    assert_eq!(scene.reparent(2, Some(2)), Err(SceneError::SelfParent(2)));
    assert_eq!(scene.reparent(5, Some(3)), Err(SceneError::NotAContainer(3)));
    assert_eq!(scene.reparent(5, Some(99)), Err(SceneError::UnknownItem(99)));

    // Nothing changed
    assert_eq!(scene.parent(1), None);
    assert_eq!(scene.parent(5), None);
    assert_parent_child_consistent(&scene);
}

#[test]
fn test_update_items_reports_changes() {
    let mut scene = nested_scene();

    let patch = ItemPatch {
        x: Some(300.0),
        ..Default::default()
    };
    let changed = scene.update_items(&[3, 5, 42], &patch);

    assert_eq!(changed, vec![3]);
    assert_eq!(scene.candidates_at(Point::new(310.0, 10.0)).len(), 2);
}

#[test]
fn test_spatial_index_follows_moves() {
    let mut scene = nested_scene();

    scene.set_position(5, Point::new(1000.0, 1000.0)).unwrap();

    assert!(scene.candidates_at(Point::new(310.0, 10.0)).is_empty());
    assert_eq!(scene.candidates_at(Point::new(1010.0, 1010.0)), vec![5]);
    assert_eq!(scene.candidates_in(&Rect::new(900.0, 900.0, 200.0, 200.0)), vec![5]);
}

#[test]
fn test_set_order_validates_permutation() {
    let mut scene = nested_scene();

    assert!(scene.set_order(&[1, 2, 3]).is_err());
    assert!(scene.set_order(&[1, 2, 3, 4, 4]).is_err());
    assert_eq!(scene.set_order(&[1, 2, 3, 4, 99]), Err(SceneError::UnknownItem(99)));

    scene.set_order(&[5, 4, 3, 2, 1]).unwrap();
    assert_eq!(scene.order(), vec![5, 4, 3, 2, 1]);
    assert_eq!(scene.z_index(1), Some(4));
}

#[test]
fn test_effective_lock_and_visibility() {
    let mut scene = nested_scene();

    let patch = ItemPatch {
        is_locked: Some(true),
        is_visible: Some(false),
        ..Default::default()
    };
    assert_eq!(scene.update_items(&[1], &patch), vec![1]);

    assert!(scene.is_effectively_locked(3));
    assert!(scene.is_effectively_hidden(4));
    assert!(!scene.is_effectively_locked(5));
    assert_eq!(scene.visible_items().map(|item| item.id).collect::<Vec<_>>(), vec![5]);
}
