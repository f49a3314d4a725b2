use super::MenuId;
use crate::host::Click;
use serde_json::Value;
use std::fmt;

/// Outcome of a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Confirmed,
    Denied,
}

impl ConfirmationStatus {
    pub fn is_successful(&self) -> bool {
        *self == ConfirmationStatus::Confirmed
    }
}

/// Handed to a confirmation continuation, exactly once
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub status: ConfirmationStatus,
    /// The click that resolved the dialog
    pub click: Click,
}

/// Resumes the caller of a confirmation with its result
pub type Continuation = Box<dyn FnOnce(Confirmation) -> MenuCommand + Send>;

/// Side effects a menu asks the registry to perform on behalf of the clicking user.
///
/// Menus never reach into the registry directly; they return one of these from
/// click handling and the registry executes it afterwards.
pub enum MenuCommand {
    /// Do nothing
    None,

    /// Execute several commands in order
    Batch(Vec<MenuCommand>),

    /// Open a registered menu
    Open {
        menu: MenuId,
        attachment: Option<Value>,
    },

    /// Go back one step in the user's navigation history
    Back,

    /// Close whatever the user has open
    Close,

    /// Redraw the clicked menu for the clicking user
    Redraw,

    /// Schedule a redraw of every open instance of a menu
    Refresh(MenuId),

    /// Ask the user to confirm, resuming `continuation` with the answer
    Confirm {
        title: Option<String>,
        continuation: Continuation,
    },

    /// Send a user-visible message
    Message(String),
}

impl MenuCommand {
    pub fn open(menu: impl Into<MenuId>) -> Self {
        MenuCommand::Open {
            menu: menu.into(),
            attachment: None,
        }
    }

    pub fn open_with(menu: impl Into<MenuId>, attachment: Value) -> Self {
        MenuCommand::Open {
            menu: menu.into(),
            attachment: Some(attachment),
        }
    }

    pub fn confirm<F>(continuation: F) -> Self
    where
        F: FnOnce(Confirmation) -> MenuCommand + Send + 'static,
    {
        MenuCommand::Confirm {
            title: None,
            continuation: Box::new(continuation),
        }
    }

    pub fn confirm_titled<F>(title: impl Into<String>, continuation: F) -> Self
    where
        F: FnOnce(Confirmation) -> MenuCommand + Send + 'static,
    {
        MenuCommand::Confirm {
            title: Some(title.into()),
            continuation: Box::new(continuation),
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        MenuCommand::Message(text.into())
    }

    pub fn batch(commands: Vec<MenuCommand>) -> Self {
        MenuCommand::Batch(commands)
    }
}

impl Default for MenuCommand {
    fn default() -> Self {
        MenuCommand::None
    }
}

impl fmt::Debug for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuCommand::None => write!(f, "None"),
            MenuCommand::Batch(commands) => f.debug_tuple("Batch").field(commands).finish(),
            MenuCommand::Open { menu, attachment } => f
                .debug_struct("Open")
                .field("menu", menu)
                .field("attachment", attachment)
                .finish(),
            MenuCommand::Back => write!(f, "Back"),
            MenuCommand::Close => write!(f, "Close"),
            MenuCommand::Redraw => write!(f, "Redraw"),
            MenuCommand::Refresh(menu) => f.debug_tuple("Refresh").field(menu).finish(),
            MenuCommand::Confirm { title, .. } => f
                .debug_struct("Confirm")
                .field("title", title)
                .finish_non_exhaustive(),
            MenuCommand::Message(text) => f.debug_tuple("Message").field(text).finish(),
        }
    }
}
