//! IPC message types for client ↔ daemon communication.
//!
//! Uses JSON Lines (newline-delimited JSON) over Unix stream socket.
//! Message schema uses familiar field names (id, method, params, result, error)
//! plus an HTTP-style `status` so callers can tell "created" from "ok".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Product, Task};
use crate::error::{StoreError, ValidationError};

/// Request sent from a client to the daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonRequest {
    /// Unique request ID for correlating responses.
    pub id: u64,
    /// Method name (e.g., "task.list", "product.create").
    pub method: String,
    /// Method parameters as JSON value.
    #[serde(default)]
    pub params: Value,
}

impl DaemonRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    /// Create a request with no parameters.
    pub fn no_params(id: u64, method: impl Into<String>) -> Self {
        Self::new(id, method, Value::Object(Default::default()))
    }
}

/// Response status codes, mirroring their HTTP meaning.
pub struct Status;

impl Status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_ERROR: u16 = 500;
}

/// Response sent from the daemon to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonResponse {
    /// Request ID this response corresponds to.
    pub id: u64,
    pub status: u16,
    /// Result body on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DaemonError>,
}

impl DaemonResponse {
    /// Create a 200 response.
    pub fn success(id: u64, result: Value) -> Self {
        Self::with_status(id, Status::OK, result)
    }

    /// Create a 201 response.
    pub fn created(id: u64, result: Value) -> Self {
        Self::with_status(id, Status::CREATED, result)
    }

    pub fn with_status(id: u64, status: u16, result: Value) -> Self {
        Self {
            id,
            status,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response; the status follows from the error code.
    pub fn error(id: u64, error: DaemonError) -> Self {
        Self {
            id,
            status: error.status(),
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response indicates success.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Error details in a daemon response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonError {
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl DaemonError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PARSE_ERROR, message)
    }

    /// Invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_REQUEST, message)
    }

    /// Method not found error (-32601).
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::METHOD_NOT_FOUND,
            format!("Unknown method: {}", method.into()),
        )
    }

    /// Invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    /// Internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INTERNAL_ERROR, message)
    }

    /// Status code carried alongside this error.
    pub fn status(&self) -> u16 {
        match self.code {
            ErrorCode::NOT_FOUND | ErrorCode::METHOD_NOT_FOUND => Status::NOT_FOUND,
            ErrorCode::INTERNAL_ERROR => Status::INTERNAL_ERROR,
            _ => Status::BAD_REQUEST,
        }
    }
}

impl From<ValidationError> for DaemonError {
    fn from(err: ValidationError) -> Self {
        Self::invalid_params(err.message)
    }
}

impl From<StoreError> for DaemonError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::DuplicateKey(id) => Self::with_data(
                ErrorCode::DUPLICATE_KEY,
                err.to_string(),
                serde_json::json!({ "id": id }),
            ),
            StoreError::NotFound(id) => Self::with_data(
                ErrorCode::NOT_FOUND,
                err.to_string(),
                serde_json::json!({ "id": id }),
            ),
        }
    }
}

/// Standard error codes.
pub struct ErrorCode;

impl ErrorCode {
    /// Invalid JSON.
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Unknown method.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal daemon error.
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Task ID doesn't exist.
    pub const NOT_FOUND: i32 = 1001;
    /// Task ID already taken.
    pub const DUPLICATE_KEY: i32 = 1002;
}

/// Push event sent from the daemon to subscribed clients (no request ID).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonEvent {
    /// Event type (e.g., "task.created").
    pub event: String,
    pub data: Value,
}

impl DaemonEvent {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    pub fn task_created(task: &Task) -> Self {
        Self::new(Events::TASK_CREATED, serde_json::to_value(task).unwrap_or(Value::Null))
    }

    pub fn task_updated(task: &Task) -> Self {
        Self::new(Events::TASK_UPDATED, serde_json::to_value(task).unwrap_or(Value::Null))
    }

    pub fn task_deleted(task: &Task) -> Self {
        Self::new(Events::TASK_DELETED, serde_json::to_value(task).unwrap_or(Value::Null))
    }

    pub fn product_created(product: &Product) -> Self {
        Self::new(
            Events::PRODUCT_CREATED,
            serde_json::to_value(product).unwrap_or(Value::Null),
        )
    }
}

/// Known method names as constants.
pub struct Methods;

impl Methods {
    pub const PING: &'static str = "ping";
    pub const INDEX: &'static str = "index";
    pub const SUBSCRIBE: &'static str = "subscribe";

    // Tasks
    pub const TASK_CREATE: &'static str = "task.create";
    pub const TASK_LIST: &'static str = "task.list";
    pub const TASK_UPDATE: &'static str = "task.update";
    pub const TASK_DELETE: &'static str = "task.delete";

    // Products
    pub const PRODUCT_CREATE: &'static str = "product.create";
    pub const PRODUCT_LIST: &'static str = "product.list";

    /// Every method the daemon answers, in the order `index` reports them.
    pub const ALL: [&'static str; 9] = [
        Self::PING,
        Self::INDEX,
        Self::SUBSCRIBE,
        Self::TASK_CREATE,
        Self::TASK_LIST,
        Self::TASK_UPDATE,
        Self::TASK_DELETE,
        Self::PRODUCT_CREATE,
        Self::PRODUCT_LIST,
    ];
}

/// Known event names as constants.
pub struct Events;

impl Events {
    pub const TASK_CREATED: &'static str = "task.created";
    pub const TASK_UPDATED: &'static str = "task.updated";
    pub const TASK_DELETED: &'static str = "task.deleted";
    pub const PRODUCT_CREATED: &'static str = "product.created";
}
