//! Menu and navigation framework for slot-based interfaces.
//!
//! A host application registers [`Menu`]s with a [`MenuRegistry`], forwards
//! user clicks and closes to it, and renders the [`SlotGrid`]s it is handed
//! through the [`Host`] trait.

pub mod config;
pub mod host;
pub mod item;
pub mod menu;
pub mod menus;
pub mod registry;
pub mod tag;
pub mod text;

pub use config::MenuConfig;
pub use host::{Click, HeadlessHost, Host, UserId, View};
pub use item::{Item, ItemBuilder};
pub use menu::{
    Confirmation, ConfirmationStatus, Menu, MenuCommand, MenuCore, MenuId, OpenRequest, SlotGrid,
};
pub use menus::{ConfirmationMenu, GridMenu, GridMenuBuilder, PageSource, PagedMenu};
pub use registry::{MenuRegistry, NavigationPath, RefreshHandle};
