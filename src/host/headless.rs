//! In-memory host that records everything the core asks of it.
//!
//! Drives the demo binary and serves as the host double in tests.

use super::{Click, Host, UserId, View};
use crate::menu::SlotGrid;
use log::debug;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct HeadlessHost {
    connected: HashSet<UserId>,
    views: HashMap<UserId, SlotGrid>,
    messages: HashMap<UserId, Vec<String>>,
    renders: usize,
    redraws: usize,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, user: UserId) {
        self.connected.insert(user);
    }

    /// Mark the user offline; their view disappears with them
    pub fn disconnect(&mut self, user: UserId) {
        self.connected.remove(&user);
        self.views.remove(&user);
    }

    /// Grid currently shown to `user`
    pub fn grid(&self, user: UserId) -> Option<&SlotGrid> {
        self.views.get(&user)
    }

    pub fn messages(&self, user: UserId) -> &[String] {
        self.messages.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of full opens performed
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Number of in-place redraws performed
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Build the click the user would produce by clicking `slot` of their view.
    ///
    /// Returns `None` when nothing is open or the slot is empty.
    pub fn click_slot(&self, user: UserId, slot: usize) -> Option<Click> {
        let view = self.current_view(user)?;
        let item = self.views.get(&user)?.get(slot)?.clone();
        Some(Click::new(user, view, item).at_slot(slot))
    }
}

impl Host for HeadlessHost {
    fn render_menu(&mut self, user: UserId, grid: &SlotGrid) -> View {
        debug!("Rendering '{}' ({} slots) for {}", grid.title(), grid.size(), user);
        self.renders += 1;
        self.views.insert(user, grid.clone());
        View::new(user, grid.title(), grid.size())
    }

    fn redraw(&mut self, user: UserId, grid: &SlotGrid) {
        if let Some(view) = self.views.get_mut(&user) {
            self.redraws += 1;
            *view = grid.clone();
        }
    }

    fn close_view(&mut self, user: UserId) {
        self.views.remove(&user);
    }

    fn current_view(&self, user: UserId) -> Option<View> {
        self.views
            .get(&user)
            .map(|grid| View::new(user, grid.title(), grid.size()))
    }

    fn is_connected(&self, user: UserId) -> bool {
        self.connected.contains(&user)
    }

    fn send_message(&mut self, user: UserId, message: &str) {
        self.messages.entry(user).or_default().push(message.to_string());
    }
}
