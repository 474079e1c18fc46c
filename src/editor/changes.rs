use crate::command::ItemChange;
use crate::scene::Scene;
use crate::types::{Item, ItemId};

/// Before/after snapshots for an edit spanning several items.
///
/// Two ways to fill it: [`ChangeSet::edit`] computes the after side without
/// touching the scene (atomic actions, applied later through a command), and
/// [`ChangeSet::track`] plus [`ChangeSet::refresh`] capture a live edit
/// (gestures, which mutate the scene as they go).
#[derive(Debug, Default)]
pub(crate) struct ChangeSet {
    changes: Vec<ItemChange>,
}

impl ChangeSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Modify the pending after-snapshot of `id`, starting from the scene's
    /// current state the first time the id is seen.
    pub(crate) fn edit<F>(&mut self, scene: &Scene, id: ItemId, f: F) -> bool
    where
        F: FnOnce(&mut Item),
    {
        if let Some(change) = self.changes.iter_mut().find(|c| c.before.id == id) {
            f(&mut change.after);
            return true;
        }
        let Some(item) = scene.get(id) else {
            return false;
        };
        let mut after = item.clone();
        f(&mut after);
        self.changes.push(ItemChange {
            before: item.clone(),
            after,
        });
        true
    }

    /// Remember `before` as the starting state of an item about to be edited
    /// live. Later calls for the same id are ignored.
    pub(crate) fn track(&mut self, before: Item) {
        if self.changes.iter().any(|c| c.before.id == before.id) {
            return;
        }
        self.changes.push(ItemChange {
            after: before.clone(),
            before,
        });
    }

    /// Take every after-snapshot from the scene as it is now.
    pub(crate) fn refresh(&mut self, scene: &Scene) {
        for change in &mut self.changes {
            if let Some(current) = scene.get(change.before.id) {
                change.after = current.clone();
            }
        }
    }

    /// Changes that actually differ, in the order first seen.
    pub(crate) fn into_changes(self) -> Vec<ItemChange> {
        self.changes
            .into_iter()
            .filter(|c| c.before != c.after)
            .collect()
    }
}
