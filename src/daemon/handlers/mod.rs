//! Request handlers for the daemon
//!
//! Each submodule handles a category of IPC methods:
//! - tasks: task.create, task.list, task.update, task.delete
//! - products: product.create, product.list

pub mod products;
pub mod tasks;

pub use products::*;
pub use tasks::*;
