//! Daemon context - shared state for request handlers
//!
//! DaemonContext owns the stores and the event channel. Each store sits
//! behind its own lock, so a check-then-insert on one store runs under a
//! single write guard and cannot interleave with another writer.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use crate::ipc::messages::DaemonEvent;
use crate::store::{ProductStore, TaskStore};

/// Shared context for all daemon request handlers
#[derive(Clone)]
pub struct DaemonContext {
    pub tasks: Arc<RwLock<TaskStore>>,
    pub products: Arc<RwLock<ProductStore>>,
    /// Event broadcasting to subscribed clients
    pub event_tx: broadcast::Sender<DaemonEvent>,
}

impl DaemonContext {
    /// Create a context with empty stores publishing on `event_tx`
    pub fn new(event_tx: broadcast::Sender<DaemonEvent>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(TaskStore::new())),
            products: Arc::new(RwLock::new(ProductStore::new())),
            event_tx,
        }
    }

    /// Context with its own event channel, for callers without a server
    pub fn standalone() -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self::new(event_tx)
    }

    /// Broadcast an event to all connected clients
    pub fn broadcast(&self, event: DaemonEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DaemonEvent> {
        self.event_tx.subscribe()
    }
}
