//! The registry is the single entry point the host calls into.
//!
//! It owns every menu, each user's navigation history and the deferred
//! refresh queue, and executes the commands menus return from clicks.

pub mod history;
pub mod scheduler;

pub use history::NavigationPath;
pub use scheduler::RefreshHandle;

use crate::config::MenuConfig;
use crate::host::{Click, Host, UserId, View};
use crate::menu::{Confirmation, Continuation, Menu, MenuCommand, MenuId, OpenRequest};
use crate::menus::ConfirmationMenu;
use crate::text::colorize;
use anyhow::{Result, bail};
use log::{debug, info, warn};
use scheduler::RefreshQueue;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub struct MenuRegistry<H: Host> {
    host: H,
    config: Arc<MenuConfig>,
    menus: Vec<Box<dyn Menu>>,
    paths: HashMap<UserId, NavigationPath>,
    refresh: RefreshQueue,
    confirmation: Option<MenuId>,
}

impl<H: Host> MenuRegistry<H> {
    pub fn new(host: H, config: MenuConfig) -> Self {
        Self {
            host,
            config: Arc::new(config),
            menus: Vec::new(),
            paths: HashMap::new(),
            refresh: RefreshQueue::new(),
            confirmation: None,
        }
    }

    pub fn with_defaults(host: H) -> Self {
        Self::new(host, MenuConfig::default())
    }

    /// Register the built-in menus. Safe to call more than once.
    pub fn init(&mut self) {
        if self.confirmation.is_some() {
            return;
        }

        let confirmation = ConfirmationMenu::new(&self.config);
        let id = self.register(confirmation);
        info!("Menu registry initialized (confirmation menu: {})", id);
        self.confirmation = Some(id);
    }

    /// Close every open view and forget all per-user state
    pub fn shutdown(&mut self) {
        let mut closed = 0;

        for index in 0..self.menus.len() {
            for user in self.menus[index].core().session_users() {
                if self.current_index(user) == Some(index) {
                    self.host.close_view(user);
                }
                self.menus[index].close(user);
                closed += 1;
            }
        }

        self.paths.clear();
        self.refresh.drain();
        info!("Menu registry shut down, closed {} session(s)", closed);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Add a menu to the catalog; registering the same menu twice keeps the first
    pub fn register<M: Menu + 'static>(&mut self, menu: M) -> MenuId {
        self.register_boxed(Box::new(menu))
    }

    pub fn register_boxed(&mut self, mut menu: Box<dyn Menu>) -> MenuId {
        let id = menu.id().clone();

        if self.index_of(&id).is_some() {
            debug!("Menu {} is already registered", id);
            return id;
        }

        menu.core_mut().set_config(Arc::clone(&self.config));
        debug!("Registered menu {} ({})", id, menu.title());
        self.menus.push(menu);
        id
    }

    pub fn unregister(&mut self, id: &MenuId) -> Option<Box<dyn Menu>> {
        let index = self.index_of(id)?;

        if self.confirmation.as_ref() == Some(id) {
            self.confirmation = None;
        }

        debug!("Unregistered menu {}", id);
        Some(self.menus.remove(index))
    }

    pub fn menus(&self) -> impl Iterator<Item = &dyn Menu> {
        self.menus.iter().map(|menu| -> &dyn Menu { menu.as_ref() })
    }

    /// First registered menu that recognizes `view` as its own
    pub fn resolve(&self, view: &View) -> Option<&dyn Menu> {
        self.resolve_index(view)
            .map(|index| -> &dyn Menu { self.menus[index].as_ref() })
    }

    pub fn resolve_by_name(&self, name: &str) -> Option<&dyn Menu> {
        self.index_of(&MenuId::new(name))
            .map(|index| -> &dyn Menu { self.menus[index].as_ref() })
    }

    /// Mutable access for host-side configuration of a registered menu
    pub fn menu_mut(&mut self, id: &MenuId) -> Option<&mut (dyn Menu + 'static)> {
        let index = self.index_of(id)?;
        Some(self.menus[index].as_mut())
    }

    /// Menus with at least one connected user whose attachment equals `attachment`
    pub fn find_by_attachment(&self, attachment: &Value) -> Vec<&dyn Menu> {
        self.menus
            .iter()
            .filter(|menu| {
                menu.core().sessions().any(|session| {
                    self.host.is_connected(session.user)
                        && session.attachment.as_ref() == Some(attachment)
                })
            })
            .map(|menu| -> &dyn Menu { menu.as_ref() })
            .collect()
    }

    /// The menu the user is currently looking at, if it is one of ours
    pub fn current_menu(&self, user: UserId) -> Option<&dyn Menu> {
        self.current_index(user)
            .map(|index| -> &dyn Menu { self.menus[index].as_ref() })
    }

    pub fn navigation(&self, user: UserId) -> Option<&NavigationPath> {
        self.paths.get(&user)
    }

    /// Open the menu called `name` for `user`.
    ///
    /// Unknown names are ignored; a misconfigured menu is an error and leaves
    /// whatever the user had open untouched.
    pub fn open(&mut self, user: UserId, name: &str, attachment: Option<Value>) -> Result<()> {
        self.open_with(user, name, OpenRequest::new().attachment(attachment))
    }

    pub fn open_with(&mut self, user: UserId, name: &str, request: OpenRequest) -> Result<()> {
        let Some(index) = self.index_of(&MenuId::new(name)) else {
            debug!("Open request for unknown menu '{}' from {}", name, user);
            return Ok(());
        };

        self.open_index(user, index, request, true)
    }

    /// Ask `user` to confirm; `continuation` runs once with the answer
    pub fn confirm<F>(&mut self, user: UserId, continuation: F, title: Option<String>) -> Result<()>
    where
        F: FnOnce(Confirmation) -> MenuCommand + Send + 'static,
    {
        self.confirm_boxed(user, Box::new(continuation), title)
    }

    fn confirm_boxed(
        &mut self,
        user: UserId,
        continuation: Continuation,
        title: Option<String>,
    ) -> Result<()> {
        let Some(index) = self.confirmation.as_ref().and_then(|id| self.index_of(id)) else {
            bail!("The confirmation menu is not registered; call MenuRegistry::init first");
        };

        let attachment = self
            .current_index(user)
            .and_then(|current| self.menus[current].core().attachment(user).cloned());

        let request = OpenRequest::new()
            .attachment(attachment)
            .title(title)
            .continuation(continuation);

        // Dialogs stay out of the history; Back from one returns to its caller
        self.open_index(user, index, request, false)
    }

    /// Reopen the previous menu in the user's history, carrying the current attachment.
    ///
    /// From a view that was never recorded (a confirmation dialog) this
    /// returns to the last recorded menu instead.
    pub fn back(&mut self, user: UserId) -> Result<()> {
        let Some(current) = self.current_index(user) else {
            return Ok(());
        };
        let Some(path) = self.paths.get_mut(&user) else {
            return Ok(());
        };

        let recorded = path.current() == Some(self.menus[current].id());
        let target = if recorded {
            path.previous()
        } else {
            path.current().cloned()
        };
        let Some(target) = target else {
            return Ok(());
        };

        let Some(index) = self.index_of(&target) else {
            warn!("Menu {} in the history of {} is no longer registered", target, user);
            if recorded {
                self.step_forward(user);
            }
            return Ok(());
        };

        let attachment = self.menus[current].core().attachment(user).cloned();
        let result = self.open_index(user, index, OpenRequest::new().attachment(attachment), false);

        if result.is_err() && recorded {
            self.step_forward(user);
        }

        result
    }

    /// Route a click from the host to the menu that owns the view
    pub fn click(&mut self, click: Click) -> Result<()> {
        let Some(index) = self.resolve_index(&click.view) else {
            debug!("Click from {} outside any registered menu", click.user);
            return Ok(());
        };

        if click.item.is_empty() {
            return Ok(());
        }

        let core = self.menus[index].core();

        if !core.verify(&click.item) {
            warn!(
                "Ignoring untagged or forged item clicked by {} in {}",
                click.user,
                core.id()
            );
            return Ok(());
        }

        if click.item.is_similar(&core.back_button()) {
            return self.back(click.user);
        }

        let command = self.menus[index].handle(&click);
        self.execute(click.user, index, command)
    }

    /// The host closed a view (user pressed escape, opened something else, ...)
    ///
    /// Only the menu that rendered `view` loses its session, so a late close
    /// of a view the registry already replaced leaves the new menu open.
    pub fn on_close(&mut self, user: UserId, view: &View) {
        let owner = self
            .menus
            .iter()
            .position(|menu| menu.core().shows(view));

        match owner {
            Some(index) => {
                debug!("{} closed {}", user, self.menus[index].id());
                self.menus[index].close(user);
            }
            None => debug!("Ignoring close of a stale view from {}", user),
        }
    }

    pub fn on_user_disconnect(&mut self, user: UserId) {
        for menu in self.menus.iter_mut() {
            if menu.core().is_open(user) {
                menu.close(user);
            }
        }

        self.paths.remove(&user);
        debug!("Dropped menu state of disconnected user {}", user);
    }

    pub fn refresh_handle(&self) -> RefreshHandle {
        self.refresh.handle()
    }

    /// Queue a redraw of every open instance of `menu`
    pub fn request_refresh(&self, menu: &MenuId) {
        self.refresh.handle().request(menu);
    }

    /// Run queued refreshes; call from the host's control thread.
    ///
    /// Returns the number of views redrawn.
    pub fn run_scheduled(&mut self) -> usize {
        let mut redrawn = 0;

        for id in self.refresh.drain() {
            let Some(index) = self.index_of(&id) else {
                debug!("Refresh requested for unknown menu {}", id);
                continue;
            };

            for user in self.menus[index].core().session_users() {
                if !self.host.is_connected(user) || self.current_index(user) != Some(index) {
                    continue;
                }

                let grid = self.menus[index].render(user);
                self.host.redraw(user, &grid);
                redrawn += 1;
            }
        }

        redrawn
    }

    fn index_of(&self, id: &MenuId) -> Option<usize> {
        self.menus.iter().position(|menu| menu.id() == id)
    }

    fn resolve_index(&self, view: &View) -> Option<usize> {
        self.menus
            .iter()
            .position(|menu| menu.core().is_current_view(view))
    }

    fn current_index(&self, user: UserId) -> Option<usize> {
        let view = self.host.current_view(user)?;
        self.resolve_index(&view)
    }

    fn step_forward(&mut self, user: UserId) {
        if let Some(path) = self.paths.get_mut(&user) {
            path.next();
        }
    }

    fn open_index(
        &mut self,
        user: UserId,
        index: usize,
        request: OpenRequest,
        record: bool,
    ) -> Result<()> {
        let previous = self.current_index(user);
        let grid = self.menus[index].open(user, request)?;
        self.menus[index]
            .core_mut()
            .set_rendered_title(user, grid.title());

        if let Some(previous) = previous {
            if previous != index {
                self.menus[previous].close(user);
            }
            self.host.close_view(user);
        }

        if record {
            let menu = &self.menus[index];
            let path = self
                .paths
                .entry(user)
                .or_insert_with(|| NavigationPath::new(user));

            if menu.core().is_main_menu() {
                path.clear();
            }
            path.push(menu.id().clone());
        }

        debug!("Opened {} for {}", self.menus[index].id(), user);
        self.host.render_menu(user, &grid);
        Ok(())
    }

    fn close_current(&mut self, user: UserId) {
        if let Some(index) = self.current_index(user) {
            self.menus[index].close(user);
        }
        self.host.close_view(user);
    }

    fn execute(&mut self, user: UserId, origin: usize, command: MenuCommand) -> Result<()> {
        match command {
            MenuCommand::None => Ok(()),
            MenuCommand::Batch(commands) => {
                for command in commands {
                    self.execute(user, origin, command)?;
                }
                Ok(())
            }
            MenuCommand::Open { menu, attachment } => match self.index_of(&menu) {
                Some(index) => {
                    self.open_index(user, index, OpenRequest::new().attachment(attachment), true)
                }
                None => {
                    debug!("Handler asked to open unknown menu {}", menu);
                    Ok(())
                }
            },
            MenuCommand::Back => self.back(user),
            MenuCommand::Close => {
                self.close_current(user);
                Ok(())
            }
            MenuCommand::Redraw => {
                if self.menus[origin].core().is_open(user) {
                    let grid = self.menus[origin].render(user);
                    self.host.redraw(user, &grid);
                }
                Ok(())
            }
            MenuCommand::Refresh(menu) => {
                self.request_refresh(&menu);
                Ok(())
            }
            MenuCommand::Confirm {
                title,
                continuation,
            } => self.confirm_boxed(user, continuation, title),
            MenuCommand::Message(text) => {
                self.host.send_message(user, &colorize(&text));
                Ok(())
            }
        }
    }
}
