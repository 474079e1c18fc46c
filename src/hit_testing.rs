//! Hit testing: resolve pointer positions to items and handles.
//!
//! Eligibility rules shared by every query here:
//! - groups are never hit directly, only through their members
//! - locked or hidden items (or items inside a locked or hidden container)
//!   are skipped
//! - among candidates, the topmost in z-order wins

use crate::camera::Camera;
use crate::geometry::{Point, Rect};
use crate::perf::profile_scope;
use crate::scene::Scene;
use crate::types::{Handle, ItemId, ItemType};

/// Topmost directly clickable item under `point` (world space).
pub fn hit_test(scene: &Scene, point: Point) -> Option<ItemId> {
    profile_scope!("hit_test");

    scene
        .candidates_at(point)
        .into_iter()
        .filter(|&id| is_hittable(scene, id))
        .filter_map(|id| scene.z_index(id).map(|z| (z, id)))
        .max_by_key(|&(z, _)| z)
        .map(|(_, id)| id)
}

/// Lift a hit to its outermost unlocked container, so clicking a grouped
/// member acts on the whole group.
pub fn promote_to_container(scene: &Scene, id: ItemId) -> ItemId {
    let mut target = id;
    while let Some(parent) = scene.parent(target) {
        match scene.get(parent) {
            Some(container) if !container.is_locked => target = parent,
            _ => break,
        }
    }
    target
}

/// The item a pointer press at `point` acts on: the hit item promoted
/// through its containers.
pub fn hit_target(scene: &Scene, point: Point) -> Option<ItemId> {
    hit_test(scene, point).map(|id| promote_to_container(scene, id))
}

/// Resize handle under a screen position. Only offered when exactly one
/// eligible item is selected. `radius` is in screen pixels so handles stay
/// grabbable at any zoom.
pub fn hit_handle(
    scene: &Scene,
    selection: &[ItemId],
    camera: &Camera,
    screen: Point,
    radius: f32,
) -> Option<(ItemId, Handle)> {
    let [id] = selection else {
        return None;
    };
    let item = scene.get(*id)?;
    if scene.is_effectively_locked(item.id) || scene.is_effectively_hidden(item.id) {
        return None;
    }

    let rect = item.rect();
    Handle::ALL
        .iter()
        .map(|&handle| {
            let grip = camera.world_to_screen(handle.position(&rect));
            (handle, grip.distance(screen))
        })
        .filter(|&(_, distance)| distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(handle, _)| (item.id, handle))
}

/// Items selected by a marquee: top-level, eligible, and strictly
/// overlapping `marquee`. Returned in z-order.
pub fn marquee_members(scene: &Scene, marquee: &Rect) -> Vec<ItemId> {
    profile_scope!("marquee_members");

    let mut members: Vec<(usize, ItemId)> = scene
        .candidates_in(marquee)
        .into_iter()
        .filter(|&id| scene.parent(id).is_none())
        .filter(|&id| !scene.is_effectively_locked(id) && !scene.is_effectively_hidden(id))
        .filter_map(|id| scene.z_index(id).map(|z| (z, id)))
        .collect();
    members.sort_unstable_by_key(|&(z, _)| z);
    members.into_iter().map(|(_, id)| id).collect()
}

/// Contiguous run of siblings between `anchor` and `clicked`, inclusive, as
/// the layer list shows them. `None` if the two do not share a parent.
pub fn layer_range(scene: &Scene, anchor: ItemId, clicked: ItemId) -> Option<Vec<ItemId>> {
    let anchor_parent = scene.get(anchor)?.parent_id;
    let clicked_parent = scene.get(clicked)?.parent_id;
    if anchor_parent != clicked_parent {
        return None;
    }

    let siblings = scene.siblings(anchor_parent);
    let a = siblings.iter().position(|&id| id == anchor)?;
    let b = siblings.iter().position(|&id| id == clicked)?;
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    Some(siblings[start..=end].to_vec())
}

/// Topmost frame strictly overlapping `rect` that may adopt dragged items.
pub fn frame_under(scene: &Scene, rect: &Rect, exclude: &[ItemId]) -> Option<ItemId> {
    scene
        .candidates_in(rect)
        .into_iter()
        .filter(|id| !exclude.contains(id))
        .filter(|&id| {
            scene
                .get(id)
                .is_some_and(|item| item.item_type == ItemType::Frame)
        })
        .filter(|&id| !scene.is_effectively_locked(id) && !scene.is_effectively_hidden(id))
        .filter_map(|id| scene.z_index(id).map(|z| (z, id)))
        .max_by_key(|&(z, _)| z)
        .map(|(_, id)| id)
}

fn is_hittable(scene: &Scene, id: ItemId) -> bool {
    scene.get(id).is_some_and(|item| item.item_type != ItemType::Group)
        && !scene.is_effectively_locked(id)
        && !scene.is_effectively_hidden(id)
}
