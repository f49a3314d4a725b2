//! Boundary with the host platform.
//!
//! The host renders grids, reads raw clicks and tracks connections; the core
//! only sees the snapshots defined here and talks back through [`Host`].

pub mod headless;

pub use headless::HeadlessHost;

use crate::item::Item;
use crate::menu::SlotGrid;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a connected user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// What a user currently has open, as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub viewer: UserId,
    /// Displayed title; `None` when the host cannot read it
    pub title: Option<String>,
    pub size: usize,
}

impl View {
    pub fn new(viewer: UserId, title: impl Into<String>, size: usize) -> Self {
        Self {
            viewer,
            title: Some(title.into()),
            size,
        }
    }
}

/// An already-authenticated click delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub user: UserId,
    pub view: View,
    /// Snapshot of the clicked item as the client reported it
    pub item: Item,
    pub slot: Option<usize>,
}

impl Click {
    pub fn new(user: UserId, view: View, item: Item) -> Self {
        Self {
            user,
            view,
            item,
            slot: None,
        }
    }

    pub fn at_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }
}

/// Services the core requires from the host platform.
///
/// Every call happens on the host's control thread.
pub trait Host {
    /// Show `grid` to `user`, replacing whatever they had open
    fn render_menu(&mut self, user: UserId, grid: &SlotGrid) -> View;

    /// Replace the contents of the view `user` has open
    fn redraw(&mut self, user: UserId, grid: &SlotGrid);

    fn close_view(&mut self, user: UserId);

    fn current_view(&self, user: UserId) -> Option<View>;

    fn is_connected(&self, user: UserId) -> bool;

    /// Deliver a user-visible message (already colorized)
    fn send_message(&mut self, user: UserId, message: &str);
}
