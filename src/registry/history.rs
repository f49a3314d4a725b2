use crate::host::UserId;
use crate::menu::MenuId;

/// A user's back/forward history of opened menus.
///
/// The pointer always indexes a valid entry while the history is non-empty;
/// moves that would leave the history return `None` and leave it in place.
#[derive(Debug, Clone)]
pub struct NavigationPath {
    user: UserId,
    history: Vec<MenuId>,
    pointer: usize,
}

impl NavigationPath {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            history: Vec::new(),
            pointer: 0,
        }
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    /// Record `menu` as the current entry.
    ///
    /// Re-opening the current menu is a no-op. Entries ahead of the pointer
    /// are dropped before appending.
    pub fn push(&mut self, menu: MenuId) {
        if self.current() == Some(&menu) {
            return;
        }

        if !self.history.is_empty() {
            self.history.truncate(self.pointer + 1);
        }

        self.history.push(menu);
        self.pointer = self.history.len() - 1;
    }

    pub fn current(&self) -> Option<&MenuId> {
        self.history.get(self.pointer)
    }

    pub fn peek_next(&self) -> Option<&MenuId> {
        self.history.get(self.pointer + 1)
    }

    pub fn peek_previous(&self) -> Option<&MenuId> {
        self.pointer.checked_sub(1).and_then(|index| self.history.get(index))
    }

    /// Step back, returning the menu now current
    pub fn previous(&mut self) -> Option<MenuId> {
        let menu = self.peek_previous()?.clone();
        self.pointer -= 1;
        Some(menu)
    }

    /// Step forward, returning the menu now current
    pub fn next(&mut self) -> Option<MenuId> {
        let menu = self.peek_next()?.clone();
        self.pointer += 1;
        Some(menu)
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.pointer = 0;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn history(&self) -> &[MenuId] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
