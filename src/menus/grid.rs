//! Declarative grid menu.
//!
//! Items are registered in order through [`GridMenuBuilder`] and numbered from
//! 1. Each row shows up to three of them at its left, center and right slots:
//! row `k` holds items `3k+1`, `3k+2` and `3k+3`. Partial rows are collapsed
//! so their items stay symmetric around the center.

use crate::host::{Click, UserId};
use crate::item::{Item, ItemBuilder};
use crate::menu::{Menu, MenuCommand, MenuCore, OpenRequest, ROW_WIDTH, SlotGrid};
use crate::tag;
use crate::text::{colorize, raw_identifier};
use anyhow::{Result, bail};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Most handler-backed items a grid menu can lay out
pub const MAX_HANDLER_ITEMS: usize = 17;

const ITEMS_PER_ROW: usize = 3;
const SPACING: usize = 4;

/// Called with the click and the clicking user's attachment
pub type ClickHandler = Box<dyn Fn(&Click, Option<&Value>) -> MenuCommand + Send>;

/// Per-user on/off state of a toggle, keyed by the toggle's raw name
pub type ToggleState = Box<dyn Fn(UserId, &str) -> bool + Send>;

/// Per-user item shown by switch items; `None` leaves the slot blank
pub type ItemProvider = Box<dyn Fn(UserId) -> Option<Item> + Send>;

#[derive(Debug, Clone, PartialEq)]
pub enum GridItemKind {
    /// Always shows the same item
    Static(Item),
    /// Shows whatever the menu's provider returns for the viewer
    Switch,
    /// Shows an ON or OFF item depending on the viewer's state
    Toggle { name: String, raw_name: String },
}

pub struct GridItem {
    index: usize,
    kind: GridItemKind,
    handler: ClickHandler,
}

impl GridItem {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> &GridItemKind {
        &self.kind
    }
}

impl fmt::Debug for GridItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridItem")
            .field("index", &self.index)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Fluent builder listing a grid menu's items in display order
pub struct GridMenuBuilder {
    title: String,
    items: Vec<GridItem>,
    toggle_state: Option<ToggleState>,
    provider: Option<ItemProvider>,
    extra_slots: usize,
    main_menu: bool,
}

impl GridMenuBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            items: Vec::new(),
            toggle_state: None,
            provider: None,
            extra_slots: 0,
            main_menu: false,
        }
    }

    fn push(&mut self, kind: GridItemKind, handler: ClickHandler) {
        let index = self.items.len() + 1;
        self.items.push(GridItem {
            index,
            kind,
            handler,
        });
    }

    /// Add a fixed item
    pub fn item<F>(mut self, item: Item, handler: F) -> Self
    where
        F: Fn(&Click, Option<&Value>) -> MenuCommand + Send + 'static,
    {
        self.push(GridItemKind::Static(item), Box::new(handler));
        self
    }

    /// Add an item drawn from the menu's provider on every render
    pub fn switch<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Click, Option<&Value>) -> MenuCommand + Send + 'static,
    {
        self.push(GridItemKind::Switch, Box::new(handler));
        self
    }

    /// Add an on/off item labelled `name`
    pub fn toggle<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Click, Option<&Value>) -> MenuCommand + Send + 'static,
    {
        let name = colorize(name);
        let raw_name = raw_identifier(&name);
        self.push(GridItemKind::Toggle { name, raw_name }, Box::new(handler));
        self
    }

    /// Source of toggle states; without one every toggle renders OFF
    pub fn toggle_state<F>(mut self, state: F) -> Self
    where
        F: Fn(UserId, &str) -> bool + Send + 'static,
    {
        self.toggle_state = Some(Box::new(state));
        self
    }

    /// Source of switch items; without one switches render nothing
    pub fn provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(UserId) -> Option<Item> + Send + 'static,
    {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Reserve extra slots below the items, rounded up to whole rows
    pub fn extra_slots(mut self, slots: usize) -> Self {
        self.extra_slots = slots;
        self
    }

    pub fn main_menu(mut self) -> Self {
        self.main_menu = true;
        self
    }

    pub fn build(self) -> GridMenu {
        let mut core = MenuCore::new(&self.title);
        core.set_main_menu(self.main_menu);

        GridMenu {
            core,
            items: self
                .items
                .into_iter()
                .map(|item| (item.index, item))
                .collect(),
            toggle_state: self.toggle_state,
            provider: self.provider,
            extra_slots: self.extra_slots.div_ceil(ROW_WIDTH) * ROW_WIDTH,
        }
    }
}

pub struct GridMenu {
    core: MenuCore,
    items: BTreeMap<usize, GridItem>,
    toggle_state: Option<ToggleState>,
    provider: Option<ItemProvider>,
    extra_slots: usize,
}

impl GridMenu {
    pub fn builder(title: &str) -> GridMenuBuilder {
        GridMenuBuilder::new(title)
    }

    pub fn grid_items(&self) -> impl Iterator<Item = &GridItem> {
        self.items.values()
    }

    pub fn is_toggled_on(&self, user: UserId, raw_name: &str) -> bool {
        self.toggle_state
            .as_ref()
            .is_some_and(|state| state(user, raw_name))
    }

    fn render_item(&self, user: UserId, item: &GridItem) -> Option<Item> {
        let rendered = match &item.kind {
            GridItemKind::Static(item) => item.clone(),
            GridItemKind::Switch => self.provider.as_ref().and_then(|provider| provider(user))?,
            GridItemKind::Toggle { name, raw_name } => {
                let style = &self.core.config().toggles;
                let (material, suffix) = if self.is_toggled_on(user, raw_name) {
                    (&style.on_material, &style.on_suffix)
                } else {
                    (&style.off_material, &style.off_suffix)
                };

                ItemBuilder::new(material.as_str())
                    .display_name(&format!("{}{}", name, suffix))
                    .enchanted(true)
                    .build()
            }
        };

        if rendered.is_empty() {
            return None;
        }

        Some(tag::tag_slot(&self.core.tag(&rendered), item.index))
    }
}

/// Slots used by one row given which of its three logical items exist.
///
/// Returns `(slot, item)` pairs in left to right order.
pub fn place_row<T>(
    row: usize,
    left: Option<T>,
    center: Option<T>,
    right: Option<T>,
) -> Vec<(usize, T)> {
    let center_slot = row * ROW_WIDTH + SPACING;
    let left_slot = center_slot - SPACING;
    let right_slot = center_slot + SPACING;

    match (left, center, right) {
        (None, None, None) => Vec::new(),
        (Some(left), None, None) => vec![(center_slot, left)],
        (Some(left), None, Some(right)) => vec![(left_slot, left), (right_slot, right)],
        (None, Some(center), None) => vec![(center_slot, center)],
        (None, Some(center), Some(right)) => vec![(left_slot, center), (right_slot, right)],
        (Some(left), Some(center), None) => vec![(left_slot, left), (right_slot, center)],
        (Some(left), Some(center), Some(right)) => {
            vec![(left_slot, left), (center_slot, center), (right_slot, right)]
        }
        (None, None, Some(right)) => vec![(right_slot, right)],
    }
}

impl Menu for GridMenu {
    fn core(&self) -> &MenuCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MenuCore {
        &mut self.core
    }

    fn size(&self, _user: UserId) -> usize {
        let rows = self.items.len().div_ceil(ITEMS_PER_ROW);
        (rows * ROW_WIDTH + self.extra_slots).max(ROW_WIDTH)
    }

    fn items(&self, user: UserId) -> Vec<Item> {
        self.items
            .values()
            .filter_map(|item| self.render_item(user, item))
            .collect()
    }

    fn render(&self, user: UserId) -> SlotGrid {
        let size = self.size(user);
        let rows = size / ROW_WIDTH;
        let mut grid = SlotGrid::new(self.core.title(), size);

        for row in 0..rows {
            let first = row * ITEMS_PER_ROW + 1;
            let placed = place_row(
                row,
                self.items.get(&first),
                self.items.get(&(first + 1)),
                self.items.get(&(first + 2)),
            );

            for (slot, item) in placed {
                if let Some(rendered) = self.render_item(user, item) {
                    grid.set(slot, rendered);
                }
            }
        }

        if grid.is_row_empty(rows - 1) {
            grid.set(size - 5, self.core.back_button());
        }

        grid
    }

    fn open(&mut self, user: UserId, request: OpenRequest) -> Result<SlotGrid> {
        if self.items.len() > MAX_HANDLER_ITEMS {
            bail!(
                "Grid menu {} has {} handler items, at most {} are supported",
                self.core.id(),
                self.items.len(),
                MAX_HANDLER_ITEMS
            );
        }

        self.core.open(user, request.attachment);
        Ok(self.render(user))
    }

    fn handle(&mut self, click: &Click) -> MenuCommand {
        let Some(index) = tag::read_slot(&click.item) else {
            return MenuCommand::None;
        };

        let Some(item) = self.items.get(&index) else {
            debug!("No handler at index {} in {}", index, self.core.id());
            return MenuCommand::None;
        };

        (item.handler)(click, self.core.attachment(click.user))
    }
}
