//! The set of live items.
//!
//! Backed by `im::OrdMap` so cloning a board (for drop previews) is O(1)
//! and iteration order is deterministic (by `ItemId`).

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::item::Item;
use crate::core::{InvariantError, ItemId};
use crate::grid::CellIndex;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemSetRaw")]
pub struct ItemSet {
    items: OrdMap<ItemId, Item>,
}

#[derive(Deserialize)]
struct ItemSetRaw {
    items: OrdMap<ItemId, Item>,
}

impl TryFrom<ItemSetRaw> for ItemSet {
    type Error = InvariantError;

    fn try_from(raw: ItemSetRaw) -> Result<Self, Self::Error> {
        if let Some((&key, item)) = raw.items.iter().find(|(key, item)| **key != item.id()) {
            return Err(InvariantError::MisfiledItem { key, item: item.id() });
        }
        Ok(Self { items: raw.items })
    }
}

impl ItemSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item.
    ///
    /// Panics if an item with the same id is already live.
    pub fn insert(&mut self, item: Item) {
        let id = item.id();
        if self.items.insert(id, item).is_some() {
            panic!("{} already exists in item set", id);
        }
    }

    /// Remove and return an item.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// The item whose cached position is `cell`.
    ///
    /// Linear scan; boards are small.
    #[must_use]
    pub fn at(&self, cell: CellIndex) -> Option<&Item> {
        self.items.values().find(|item| item.cell() == cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
