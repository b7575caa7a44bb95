//! Daemon Core - shared store state and request routing
//!
//! The daemon is the long-running process that:
//! - Owns the task and product stores for its lifetime
//! - Routes each IPC request to its handler
//! - Publishes change events to subscribed clients

pub mod context;
pub mod handlers;
pub mod router;

pub use context::DaemonContext;
pub use router::Dispatcher;
