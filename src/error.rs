//! Error types for Taskshop
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::domain::TaskId;

/// Payload rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A task with this id already exists
    #[error("Task already exists: {0}")]
    DuplicateKey(TaskId),

    /// No task with this id
    #[error("Task not found: {0}")]
    NotFound(TaskId),
}

/// All error types that can occur in Taskshop
#[derive(Debug, Error)]
pub enum TaskshopError {
    /// Malformed, missing or mistyped input
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Store rejected the operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// IPC communication error
    #[error("IPC error: {0}")]
    Ipc(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Taskshop operations
pub type Result<T> = std::result::Result<T, TaskshopError>;
