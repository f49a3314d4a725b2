//! Deferred live-refresh requests.
//!
//! Requests may come from any thread; they are only acted on when the host
//! drains the queue from its control thread.

use crate::menu::MenuId;
use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Cloneable handle for requesting a redraw of every open instance of a menu
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: UnboundedSender<MenuId>,
}

impl RefreshHandle {
    /// Queue a refresh; returns false once the registry is gone
    pub fn request(&self, menu: impl Into<MenuId>) -> bool {
        self.tx.send(menu.into()).is_ok()
    }
}

#[derive(Debug)]
pub(crate) struct RefreshQueue {
    tx: UnboundedSender<MenuId>,
    rx: UnboundedReceiver<MenuId>,
}

impl RefreshQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub(crate) fn handle(&self) -> RefreshHandle {
        RefreshHandle {
            tx: self.tx.clone(),
        }
    }

    /// Pending requests in arrival order, duplicates collapsed
    pub(crate) fn drain(&mut self) -> Vec<MenuId> {
        let mut pending: Vec<MenuId> = Vec::new();

        while let Ok(menu) = self.rx.try_recv() {
            if !pending.contains(&menu) {
                pending.push(menu);
            }
        }

        if !pending.is_empty() {
            debug!("Draining {} refresh request(s)", pending.len());
        }

        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_collapses_duplicates() {
        let mut queue = RefreshQueue::new();
        let handle = queue.handle();

        assert!(handle.request("Shop"));
        assert!(handle.request("Bank"));
        assert!(handle.request("&bShop"));

        assert_eq!(queue.drain(), vec![MenuId::new("Shop"), MenuId::new("Bank")]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_requests_from_other_threads() {
        let mut queue = RefreshQueue::new();
        let handle = queue.handle();

        std::thread::spawn(move || handle.request("Shop"))
            .join()
            .unwrap();

        assert_eq!(queue.drain(), vec![MenuId::new("Shop")]);
    }
}
