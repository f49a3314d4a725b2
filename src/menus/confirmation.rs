use crate::config::MenuConfig;
use crate::host::{Click, UserId};
use crate::item::Item;
use crate::menu::{
    Confirmation, ConfirmationStatus, Continuation, Menu, MenuCommand, MenuCore, OpenRequest,
    ROW_WIDTH, SlotGrid,
};
use crate::text::colorize;
use anyhow::Result;
use log::debug;
use std::collections::HashMap;

const CONFIRM_SLOT: usize = 2;
const BACK_SLOT: usize = 4;
const DENY_SLOT: usize = 6;

/// Built-in yes/no dialog that resumes the asking code with the answer
pub struct ConfirmationMenu {
    core: MenuCore,
    continuations: HashMap<UserId, Continuation>,
    titles: HashMap<UserId, String>,
}

impl ConfirmationMenu {
    pub fn new(config: &MenuConfig) -> Self {
        Self {
            core: MenuCore::new(&config.confirmation.title),
            continuations: HashMap::new(),
            titles: HashMap::new(),
        }
    }

    pub fn confirm_item(&self) -> Item {
        self.core
            .tag(&self.core.config().confirmation.confirm.build())
    }

    pub fn deny_item(&self) -> Item {
        self.core.tag(&self.core.config().confirmation.deny.build())
    }

    /// True while a continuation is waiting on this user's answer
    pub fn is_pending(&self, user: UserId) -> bool {
        self.continuations.contains_key(&user)
    }
}

impl Menu for ConfirmationMenu {
    fn core(&self) -> &MenuCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MenuCore {
        &mut self.core
    }

    fn items(&self, _user: UserId) -> Vec<Item> {
        vec![self.confirm_item(), self.deny_item()]
    }

    fn render(&self, user: UserId) -> SlotGrid {
        let title = self
            .titles
            .get(&user)
            .map(String::as_str)
            .unwrap_or(self.core.title());
        let mut grid = SlotGrid::new(title, ROW_WIDTH);

        grid.set(CONFIRM_SLOT, self.confirm_item());
        grid.set(BACK_SLOT, self.core.back_button());
        grid.set(DENY_SLOT, self.deny_item());
        grid
    }

    fn open(&mut self, user: UserId, request: OpenRequest) -> Result<SlotGrid> {
        self.core.open(user, request.attachment);

        match request.title {
            Some(title) => self.titles.insert(user, colorize(&title)),
            None => self.titles.remove(&user),
        };

        match request.continuation {
            Some(continuation) => self.continuations.insert(user, continuation),
            None => self.continuations.remove(&user),
        };

        Ok(self.render(user))
    }

    fn handle(&mut self, click: &Click) -> MenuCommand {
        let status = if click.item.is_similar(&self.confirm_item()) {
            ConfirmationStatus::Confirmed
        } else {
            ConfirmationStatus::Denied
        };

        let Some(continuation) = self.continuations.remove(&click.user) else {
            debug!("{} answered a confirmation nobody is waiting for", click.user);
            return MenuCommand::None;
        };

        let confirmation = Confirmation {
            status,
            click: click.clone(),
        };

        MenuCommand::batch(vec![MenuCommand::Close, continuation(confirmation)])
    }

    fn close(&mut self, user: UserId) {
        self.continuations.remove(&user);
        self.titles.remove(&user);
        self.core.close(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::View;
    use std::sync::{Arc, Mutex};

    fn click(menu: &ConfirmationMenu, user: UserId, slot: usize) -> Click {
        let grid = menu.render(user);
        let view = View::new(user, grid.title(), grid.size());
        Click::new(user, view, grid.get(slot).cloned().unwrap()).at_slot(slot)
    }

    fn recording() -> (Arc<Mutex<Vec<ConfirmationStatus>>>, Continuation) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let continuation: Continuation = Box::new(move |confirmation: Confirmation| {
            sink.lock().unwrap().push(confirmation.status);
            MenuCommand::message("done")
        });
        (seen, continuation)
    }

    #[test]
    fn test_layout() {
        let menu = ConfirmationMenu::new(&MenuConfig::default());
        let grid = menu.render(UserId::new());

        assert_eq!(grid.size(), 9);
        assert_eq!(grid.title(), "§2Verify");
        assert_eq!(grid.get(2), Some(&menu.confirm_item()));
        assert_eq!(grid.get(4), Some(&menu.core().back_button()));
        assert_eq!(grid.get(6), Some(&menu.deny_item()));
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_caller_title_is_per_user() {
        let mut menu = ConfirmationMenu::new(&MenuConfig::default());
        let asked = UserId::new();

        let grid = menu
            .open(asked, OpenRequest::new().title(Some("&cDelete home?".to_string())))
            .unwrap();

        assert_eq!(grid.title(), "§cDelete home?");
        assert_eq!(menu.render(UserId::new()).title(), "§2Verify");

        menu.close(asked);
        assert_eq!(menu.render(asked).title(), "§2Verify");
    }

    #[test]
    fn test_confirm_runs_continuation_once() {
        let mut menu = ConfirmationMenu::new(&MenuConfig::default());
        let user = UserId::new();
        let (seen, continuation) = recording();
        menu.open(user, OpenRequest::new().continuation(continuation))
            .unwrap();

        match menu.handle(&click(&menu, user, CONFIRM_SLOT)) {
            MenuCommand::Batch(commands) => {
                assert!(matches!(commands[0], MenuCommand::Close));
                assert!(matches!(&commands[1], MenuCommand::Message(text) if text == "done"));
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(matches!(
            menu.handle(&click(&menu, user, CONFIRM_SLOT)),
            MenuCommand::None
        ));
        assert_eq!(*seen.lock().unwrap(), vec![ConfirmationStatus::Confirmed]);
    }

    #[test]
    fn test_deny() {
        let mut menu = ConfirmationMenu::new(&MenuConfig::default());
        let user = UserId::new();
        let (seen, continuation) = recording();
        menu.open(user, OpenRequest::new().continuation(continuation))
            .unwrap();

        menu.handle(&click(&menu, user, DENY_SLOT));

        assert_eq!(*seen.lock().unwrap(), vec![ConfirmationStatus::Denied]);
        assert!(!ConfirmationStatus::Denied.is_successful());
    }

    #[test]
    fn test_close_drops_continuation() {
        let mut menu = ConfirmationMenu::new(&MenuConfig::default());
        let user = UserId::new();
        let (seen, continuation) = recording();
        menu.open(user, OpenRequest::new().continuation(continuation))
            .unwrap();

        assert!(menu.is_pending(user));
        menu.close(user);
        assert!(!menu.is_pending(user));
        assert!(matches!(
            menu.handle(&click(&menu, user, CONFIRM_SLOT)),
            MenuCommand::None
        ));
        assert!(seen.lock().unwrap().is_empty());
    }
}
