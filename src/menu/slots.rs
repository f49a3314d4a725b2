use crate::item::Item;
use log::warn;
use std::collections::BTreeMap;

/// Slots per row
pub const ROW_WIDTH: usize = 9;

/// A fully laid out menu, ready for the host to display
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    title: String,
    size: usize,
    slots: BTreeMap<usize, Item>,
}

impl SlotGrid {
    pub fn new(title: impl Into<String>, size: usize) -> Self {
        Self {
            title: title.into(),
            size,
            slots: BTreeMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size / ROW_WIDTH
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(&slot)
    }

    /// Place `item` at `slot`; an empty item clears the slot
    pub fn set(&mut self, slot: usize, item: Item) {
        if slot >= self.size {
            warn!("Slot {} is outside a {}-slot grid, ignoring", slot, self.size);
            return;
        }

        if item.is_empty() {
            self.slots.remove(&slot);
        } else {
            self.slots.insert(slot, item);
        }
    }

    /// Place `item` in the first free slot, returning where it landed
    pub fn add_item(&mut self, item: Item) -> Option<usize> {
        if item.is_empty() {
            return None;
        }

        let slot = (0..self.size).find(|slot| !self.slots.contains_key(slot))?;
        self.slots.insert(slot, item);
        Some(slot)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        let start = row * ROW_WIDTH;
        self.slots.range(start..start + ROW_WIDTH).next().is_none()
    }

    /// Occupied slots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
