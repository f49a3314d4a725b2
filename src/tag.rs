//! Identity tags embedded in item metadata.
//!
//! Two reserved keys: the menu tag carries the owning menu's raw identifier,
//! the slot tag carries a grid menu's handler index. An item is trusted only
//! when its menu tag equals the menu's identifier exactly.

use crate::item::{Item, TagValue};

/// Metadata key holding the owning menu's raw identifier
pub const MENU_TAG: &str = "slot_menus_menu_tag";

/// Metadata key holding a grid menu handler index
pub const SLOT_TAG: &str = "slot_menus_slot_tag";

/// Return a copy of `item` tagged as produced by the menu `identifier`.
///
/// Empty placeholders are returned untouched; stack size is raised to at least 1.
pub fn tag(item: &Item, identifier: &str) -> Item {
    let mut tagged = item.clone();

    if tagged.is_empty() {
        return tagged;
    }

    if tagged.amount <= 0 {
        tagged.amount = 1;
    }

    tagged
        .tags
        .insert(MENU_TAG.to_string(), TagValue::Text(identifier.to_string()));
    tagged
}

/// Return a copy of `item` carrying a handler index
pub fn tag_slot(item: &Item, index: usize) -> Item {
    let mut tagged = item.clone();

    if tagged.is_empty() {
        return tagged;
    }

    tagged
        .tags
        .insert(SLOT_TAG.to_string(), TagValue::Int(index as i64));
    tagged
}

/// True iff the item carries the menu tag and it equals `identifier`
pub fn verify(item: &Item, identifier: &str) -> bool {
    item.tag(MENU_TAG)
        .and_then(TagValue::as_text)
        .is_some_and(|tag| tag == identifier)
}

/// Handler index stored on the item, if any
pub fn read_slot(item: &Item) -> Option<usize> {
    item.tag(SLOT_TAG)
        .and_then(TagValue::as_int)
        .and_then(|index| usize::try_from(index).ok())
}
