//! The contract every menu implements, plus the per-user session bookkeeping
//! they share.

pub mod command;
pub mod slots;

pub use command::{Confirmation, ConfirmationStatus, Continuation, MenuCommand};
pub use slots::{ROW_WIDTH, SlotGrid};

use crate::config::MenuConfig;
use crate::host::{Click, UserId, View};
use crate::item::Item;
use crate::tag;
use crate::text::{colorize, raw_identifier, strip_colors};
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Size of a menu that does not compute its own
pub const DEFAULT_SIZE: usize = ROW_WIDTH;

/// Normalized identifier of a menu; two menus are the same menu iff their ids match
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(String);

impl MenuId {
    /// Normalize `name` the same way titles are normalized
    pub fn new(name: &str) -> Self {
        Self(raw_identifier(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MenuId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&MenuId> for MenuId {
    fn from(id: &MenuId) -> Self {
        id.clone()
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-user state of an open menu
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSession {
    pub user: UserId,
    pub attachment: Option<Value>,
    /// Title of the grid last handed to the host for this user
    pub rendered_title: Option<String>,
}

impl OpenSession {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            attachment: None,
            rendered_title: None,
        }
    }
}

/// Everything a caller can hand a menu when opening it
#[derive(Default)]
pub struct OpenRequest {
    pub attachment: Option<Value>,
    /// Replaces the menu's title for this user only
    pub title: Option<String>,
    /// Only meaningful for confirmation dialogs
    pub continuation: Option<Continuation>,
}

impl OpenRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attachment(mut self, attachment: Option<Value>) -> Self {
        self.attachment = attachment;
        self
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = Some(continuation);
        self
    }
}

impl fmt::Debug for OpenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRequest")
            .field("attachment", &self.attachment)
            .field("title", &self.title)
            .field("continuation", &self.continuation.is_some())
            .finish()
    }
}

/// State shared by every menu kind: identity, sessions and control appearance
#[derive(Debug)]
pub struct MenuCore {
    title: String,
    id: MenuId,
    main_menu: bool,
    sessions: HashMap<UserId, OpenSession>,
    config: Arc<MenuConfig>,
}

impl MenuCore {
    pub fn new(title: &str) -> Self {
        let title = colorize(title);
        let id = MenuId::new(&title);

        Self {
            title,
            id,
            main_menu: false,
            sessions: HashMap::new(),
            config: Arc::new(MenuConfig::default()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn id(&self) -> &MenuId {
        &self.id
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: Arc<MenuConfig>) {
        self.config = config;
    }

    /// Opening a main menu clears the user's navigation history
    pub fn is_main_menu(&self) -> bool {
        self.main_menu
    }

    pub fn set_main_menu(&mut self, main_menu: bool) {
        self.main_menu = main_menu;
    }

    /// Copy of `item` marked as produced by this menu
    pub fn tag(&self, item: &Item) -> Item {
        tag::tag(item, self.id.as_str())
    }

    /// True iff `item` was produced by this menu
    pub fn verify(&self, item: &Item) -> bool {
        let mut item = item.clone();
        item.amount = item.amount.max(1);
        tag::verify(&item, self.id.as_str())
    }

    /// Does `view` show this menu?
    ///
    /// An open session for the viewer wins over the title comparison so menus
    /// with per-user titles are still recognized for their owner.
    /// An untitled view is only recognized through a session.
    pub fn is_current_view(&self, view: &View) -> bool {
        if self.sessions.contains_key(&view.viewer) {
            return true;
        }

        let Some(name) = view.title.as_deref() else {
            return false;
        };

        strip_colors(name) == strip_colors(&self.title)
    }

    /// Is `view` the grid this menu last rendered for its viewer?
    ///
    /// Stricter than [`MenuCore::is_current_view`]: a stale view of another
    /// menu never matches, even while the viewer has a session here.
    pub fn shows(&self, view: &View) -> bool {
        let Some(session) = self.sessions.get(&view.viewer) else {
            return false;
        };

        match (view.title.as_deref(), session.rendered_title.as_deref()) {
            (Some(shown), Some(rendered)) => strip_colors(shown) == strip_colors(rendered),
            _ => true,
        }
    }

    pub fn back_button(&self) -> Item {
        self.tag(&self.config.controls.back.build())
    }

    /// Create or replace the user's session
    pub fn open(&mut self, user: UserId, attachment: Option<Value>) {
        self.sessions.insert(
            user,
            OpenSession {
                attachment,
                ..OpenSession::new(user)
            },
        );
    }

    /// No-op when the user has no session here
    pub fn set_rendered_title(&mut self, user: UserId, title: &str) {
        if let Some(session) = self.sessions.get_mut(&user) {
            session.rendered_title = Some(title.to_string());
        }
    }

    pub fn close(&mut self, user: UserId) {
        self.sessions.remove(&user);
    }

    pub fn is_open(&self, user: UserId) -> bool {
        self.sessions.contains_key(&user)
    }

    /// No-op when the user has no session here
    pub fn set_attachment(&mut self, user: UserId, attachment: Value) {
        if let Some(session) = self.sessions.get_mut(&user) {
            session.attachment = Some(attachment);
        }
    }

    pub fn attachment(&self, user: UserId) -> Option<&Value> {
        self.sessions
            .get(&user)
            .and_then(|session| session.attachment.as_ref())
    }

    pub fn session(&self, user: UserId) -> Option<&OpenSession> {
        self.sessions.get(&user)
    }

    /// Snapshot of users with a session, safe to act on while closing sessions
    pub fn session_users(&self) -> Vec<UserId> {
        self.sessions.keys().copied().collect()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &OpenSession> {
        self.sessions.values()
    }
}

/// Menus are the same menu when their ids match, whatever their titles
impl PartialEq for MenuCore {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MenuCore {}

/// A reusable menu definition shared by every user.
///
/// Implementations keep all per-user state keyed by [`UserId`]; the registry
/// drives them and executes the [`MenuCommand`]s they return.
pub trait Menu: Send {
    fn core(&self) -> &MenuCore;

    fn core_mut(&mut self) -> &mut MenuCore;

    fn title(&self) -> &str {
        self.core().title()
    }

    fn id(&self) -> &MenuId {
        self.core().id()
    }

    /// Slot count for this user, a multiple of 9
    fn size(&self, _user: UserId) -> usize {
        DEFAULT_SIZE
    }

    fn rows(&self, user: UserId) -> usize {
        self.size(user) / ROW_WIDTH
    }

    /// Content items this user would see, controls excluded
    fn items(&self, user: UserId) -> Vec<Item>;

    /// Lay the menu out for a user
    fn render(&self, user: UserId) -> SlotGrid;

    /// Start a session for `user` and return the initial layout
    fn open(&mut self, user: UserId, request: OpenRequest) -> Result<SlotGrid> {
        self.core_mut().open(user, request.attachment);
        Ok(self.render(user))
    }

    /// React to a verified click on one of this menu's items
    fn handle(&mut self, click: &Click) -> MenuCommand;

    fn close(&mut self, user: UserId) {
        self.core_mut().close(user);
    }
}
