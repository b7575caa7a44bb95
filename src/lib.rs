//! Taskshop - in-memory task and product store
//!
//! Two stores sit behind a stateless validation layer and a small JSON
//! request dispatcher:
//! - tasks are keyed by caller-supplied ids and support partial updates
//! - products get sequential ids and can be listed by category and price range

pub mod daemon;
pub mod domain;
pub mod error;
pub mod ipc;
pub mod store;
pub mod validation;

pub use error::{Result, StoreError, TaskshopError, ValidationError};
