//! Invertible scene mutations, the unit of undo/redo.
//!
//! Each command stores both sides of its change, so applying it in either
//! direction never consults the current scene to reconstruct the other side.
//! Gesture commands are recorded after the live edit already happened and
//! are only applied again on undo/redo. Atomic edits are built first and then
//! applied forward through the same code path undo/redo uses.

use crate::error::{SceneError, SceneResult};
use crate::geometry::{Point, Rect};
use crate::scene::{IndexedItem, Scene};
use crate::types::{Item, ItemId, Page, PagePatch};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Whole-item snapshots from either side of a change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemChange {
    pub before: Item,
    pub after: Item,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemMove {
    pub id: ItemId,
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectChange {
    pub id: ItemId,
    pub from: Rect,
    pub to: Rect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// New items placed on top of the z-order.
    Add { items: Vec<Item> },
    /// Removed items with their slots, plus surviving parents that lost
    /// children.
    Delete {
        items: Vec<IndexedItem>,
        parents: Vec<ItemChange>,
    },
    Move { moves: Vec<ItemMove> },
    /// A resized item and the descendants scaled along with it.
    Resize {
        item: RectChange,
        children: Vec<RectChange>,
    },
    UpdateText {
        id: ItemId,
        from: String,
        to: String,
    },
    /// Arbitrary before/after snapshots for edits touching a mixed set of
    /// items, such as a drag that changes frame membership.
    UpdateBatch { changes: Vec<ItemChange> },
    Reorder { from: Vec<ItemId>, to: Vec<ItemId> },
    /// A new container plus every item whose links changed to make room
    /// for it (members and their previous parents).
    Group {
        group: IndexedItem,
        affected: Vec<ItemChange>,
    },
    /// Dissolved containers plus every item relinked to replace them.
    Ungroup {
        groups: Vec<IndexedItem>,
        affected: Vec<ItemChange>,
    },
    UpdatePage {
        page_id: String,
        from: PagePatch,
        to: PagePatch,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Delete { .. } => "delete",
            Command::Move { .. } => "move",
            Command::Resize { .. } => "resize",
            Command::UpdateText { .. } => "update_text",
            Command::UpdateBatch { .. } => "update_batch",
            Command::Reorder { .. } => "reorder",
            Command::Group { .. } => "group",
            Command::Ungroup { .. } => "ungroup",
            Command::UpdatePage { .. } => "update_page",
        }
    }

    /// Replay the command on `scene` (and `page`, for page edits).
    pub fn apply(
        &self,
        scene: &mut Scene,
        page: &mut Page,
        direction: Direction,
    ) -> SceneResult<()> {
        let forward = direction == Direction::Forward;
        match self {
            Command::Add { items } => {
                if forward {
                    scene.add_items(items.clone())
                } else {
                    let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
                    scene.remove_items(&ids);
                    Ok(())
                }
            }

            Command::Delete { items, parents } => {
                if forward {
                    let ids: Vec<ItemId> = items.iter().map(|entry| entry.item.id).collect();
                    scene.remove_items(&ids);
                    replace_side(scene, parents, direction)
                } else {
                    scene.restore(items)?;
                    replace_side(scene, parents, direction)
                }
            }

            Command::Move { moves } => {
                for m in moves {
                    scene.set_position(m.id, if forward { m.to } else { m.from })?;
                }
                Ok(())
            }

            Command::Resize { item, children } => {
                for change in std::iter::once(item).chain(children) {
                    scene.set_rect(change.id, if forward { change.to } else { change.from })?;
                }
                Ok(())
            }

            Command::UpdateText { id, from, to } => {
                scene.set_text(*id, if forward { to } else { from })
            }

            Command::UpdateBatch { changes } => replace_side(scene, changes, direction),

            Command::Reorder { from, to } => scene.set_order(if forward { to } else { from }),

            Command::Group { group, affected } => {
                if forward {
                    scene.restore(std::slice::from_ref(group))?;
                    replace_side(scene, affected, direction)
                } else {
                    replace_side(scene, affected, direction)?;
                    scene.take(group.item.id).map(|_| ())
                }
            }

            Command::Ungroup { groups, affected } => {
                if forward {
                    replace_side(scene, affected, direction)?;
                    for entry in groups {
                        scene.take(entry.item.id)?;
                    }
                    Ok(())
                } else {
                    scene.restore(groups)?;
                    replace_side(scene, affected, direction)
                }
            }

            Command::UpdatePage { page_id, from, to } => {
                if *page_id != page.id {
                    warn!(
                        command_page = %page_id,
                        page = %page.id,
                        "Page command applied to wrong page"
                    );
                    return Ok(());
                }
                let patch = if forward { to } else { from };
                patch.apply_to(page);
                Ok(())
            }
        }
    }

    /// Ids of scene items this command touches.
    pub fn affected_ids(&self) -> Vec<ItemId> {
        match self {
            Command::Add { items } => items.iter().map(|item| item.id).collect(),
            Command::Delete { items, parents } => items
                .iter()
                .map(|entry| entry.item.id)
                .chain(parents.iter().map(|c| c.after.id))
                .collect(),
            Command::Move { moves } => moves.iter().map(|m| m.id).collect(),
            Command::Resize { item, children } => std::iter::once(item.id)
                .chain(children.iter().map(|c| c.id))
                .collect(),
            Command::UpdateText { id, .. } => vec![*id],
            Command::UpdateBatch { changes } => changes.iter().map(|c| c.after.id).collect(),
            Command::Reorder { to, .. } => to.clone(),
            Command::Group { group, affected } => std::iter::once(group.item.id)
                .chain(affected.iter().map(|c| c.after.id))
                .collect(),
            Command::Ungroup { groups, affected } => groups
                .iter()
                .map(|entry| entry.item.id)
                .chain(affected.iter().map(|c| c.after.id))
                .collect(),
            Command::UpdatePage { .. } => Vec::new(),
        }
    }
}

fn replace_side(
    scene: &mut Scene,
    changes: &[ItemChange],
    direction: Direction,
) -> SceneResult<()> {
    for change in changes {
        let snapshot = match direction {
            Direction::Forward => &change.after,
            Direction::Backward => &change.before,
        };
        if snapshot.id != change.before.id {
            return Err(SceneError::UnknownItem(snapshot.id));
        }
        scene.replace(snapshot.clone())?;
    }
    Ok(())
}
