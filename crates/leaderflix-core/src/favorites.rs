use std::collections::HashSet;

use crate::item::{FavoriteItem, ItemId};

/// Ordered favorites list with an id index kept in lockstep.
///
/// The index holds an id iff the list holds an item with that id, and the
/// list never holds two items with the same id.
#[derive(Debug, Clone, Default)]
pub struct FavoritesList {
    items: Vec<FavoriteItem>,
    ids: HashSet<ItemId>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a bulk load. Later duplicates of an id are dropped.
    pub fn from_items(items: impl IntoIterator<Item = FavoriteItem>) -> Self {
        let mut list = Self::new();
        for item in items {
            list.insert(item);
        }
        list
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.ids.contains(&item_id)
    }

    /// Insert an item. Returns false if the id was already present.
    pub fn insert(&mut self, item: FavoriteItem) -> bool {
        if !self.ids.insert(item.item_id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item by id. Returns false if it was not present.
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        if !self.ids.remove(&item_id) {
            return false;
        }
        self.items.retain(|i| i.item_id != item_id);
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.item_id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
