//! Bulk-select state for list pages.

use std::collections::BTreeSet;

use salon_core::types::DbId;

/// Ids of the rows currently ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<DbId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: DbId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: DbId) {
        self.ids.insert(id);
    }

    pub fn deselect(&mut self, id: DbId) {
        self.ids.remove(&id);
    }

    pub fn is_selected(&self, id: DbId) -> bool {
        self.ids.contains(&id)
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = DbId>) {
        self.ids.extend(ids);
    }

    /// The header checkbox: select everything, or clear when everything in
    /// `ids` is already selected.
    pub fn toggle_all(&mut self, ids: impl IntoIterator<Item = DbId>) {
        let ids: Vec<DbId> = ids.into_iter().collect();
        if !ids.is_empty() && ids.iter().all(|id| self.ids.contains(id)) {
            self.clear();
        } else {
            self.select_all(ids);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that are no longer listed.
    pub fn retain_present(&mut self, present: impl IntoIterator<Item = DbId>) {
        let present: BTreeSet<DbId> = present.into_iter().collect();
        self.ids.retain(|id| present.contains(id));
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<DbId> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
