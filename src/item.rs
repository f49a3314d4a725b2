//! Visual item snapshots and a fluent builder for them

use crate::text::colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Material of the empty placeholder item
pub const AIR: &str = "AIR";

/// Value stored under an item metadata key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Int(i64),
    Text(String),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(value) => Some(value),
            TagValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            TagValue::Int(value) => Some(*value),
            TagValue::Text(_) => None,
        }
    }
}

/// A snapshot of one item as displayed in (or clicked from) a slot.
///
/// `tags` is the extended metadata the host round-trips untouched; menus use
/// it to recognize the items they produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub material: String,
    pub amount: i32,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lore: Vec<String>,
    #[serde(default)]
    pub enchanted: bool,
    #[serde(default)]
    pub tags: BTreeMap<String, TagValue>,
}

impl Item {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            amount: 1,
            display_name: None,
            lore: Vec::new(),
            enchanted: false,
            tags: BTreeMap::new(),
        }
    }

    /// The empty placeholder (nothing in the slot)
    pub fn empty() -> Self {
        Self {
            amount: 0,
            ..Self::new(AIR)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.material == AIR
    }

    /// Same item ignoring stack size
    pub fn is_similar(&self, other: &Item) -> bool {
        self.material == other.material
            && self.display_name == other.display_name
            && self.lore == other.lore
            && self.enchanted == other.enchanted
            && self.tags == other.tags
    }

    pub fn tag(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fluent builder for items; names and lore go through color translation
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            item: Item::new(material),
        }
    }

    /// Start from an existing item
    pub fn from_item(item: Item) -> Self {
        Self { item }
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.item.display_name = Some(colorize(name));
        self
    }

    pub fn lore<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        self.item.lore = lines.iter().map(|line| colorize(line.as_ref())).collect();
        self
    }

    pub fn add_lore_line(mut self, line: &str) -> Self {
        self.item.lore.push(colorize(line));
        self
    }

    /// Add the enchantment glint (the enchantment itself stays hidden)
    pub fn enchanted(mut self, enchanted: bool) -> Self {
        self.item.enchanted = enchanted;
        self
    }

    pub fn amount(mut self, amount: i32) -> Self {
        self.item.amount = amount;
        self
    }

    pub fn build(self) -> Item {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_colorizes_name_and_lore() {
        let item = ItemBuilder::new("PAPER")
            .display_name("&aPage")
            .lore(&["&7first", "second"])
            .add_lore_line("&cthird")
            .enchanted(true)
            .build();

        assert_eq!(item.display_name.as_deref(), Some("§aPage"));
        assert_eq!(item.lore, vec!["§7first", "second", "§cthird"]);
        assert!(item.enchanted);
        assert_eq!(item.amount, 1);
    }

    #[test]
    fn test_similar_ignores_amount() {
        let one = ItemBuilder::new("STONE").display_name("Rock").build();
        let many = ItemBuilder::from_item(one.clone()).amount(32).build();

        assert!(one.is_similar(&many));
        assert_ne!(one, many);
    }

    #[test]
    fn test_empty_item() {
        assert!(Item::empty().is_empty());
        assert!(!Item::new("STONE").is_empty());
    }
}
