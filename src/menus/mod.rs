//! Built-in menu kinds.

pub mod confirmation;
pub mod grid;
pub mod paged;

pub use confirmation::ConfirmationMenu;
pub use grid::{GridItem, GridItemKind, GridMenu, GridMenuBuilder, MAX_HANDLER_ITEMS};
pub use paged::{PageSource, PagedMenu};
