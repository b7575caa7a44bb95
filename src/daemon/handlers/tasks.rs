//! Task request handlers
//!
//! Handles task.* IPC methods against the shared TaskStore.

use log::{info, warn};
use serde_json::{Value, json};

use crate::daemon::context::DaemonContext;
use crate::ipc::messages::{DaemonError, DaemonEvent, DaemonResponse};
use crate::validation;

/// Handle task.create - insert a new task
pub async fn handle_task_create(id: u64, params: &Value, ctx: &DaemonContext) -> DaemonResponse {
    let task = match validation::task_create(params) {
        Ok(task) => task,
        Err(e) => return DaemonResponse::error(id, e.into()),
    };

    let result = ctx.tasks.write().await.insert(task);
    match result {
        Ok(task) => {
            info!("Created task {}", task.id);
            ctx.broadcast(DaemonEvent::task_created(&task));
            DaemonResponse::created(id, json!(task))
        }
        Err(e) => {
            warn!("Rejected task create: {}", e);
            DaemonResponse::error(id, e.into())
        }
    }
}

/// Handle task.list - all tasks in insertion order
pub async fn handle_task_list(id: u64, ctx: &DaemonContext) -> DaemonResponse {
    let tasks = ctx.tasks.read().await.list_all();
    DaemonResponse::success(id, json!(tasks))
}

/// Handle task.update - overwrite the supplied fields of one task
pub async fn handle_task_update(id: u64, params: &Value, ctx: &DaemonContext) -> DaemonResponse {
    let task_id = match validation::task_path_id(params) {
        Ok(task_id) => task_id,
        Err(e) => return DaemonResponse::error(id, DaemonError::from(e)),
    };
    let patch = validation::task_update(params);

    let result = ctx.tasks.write().await.update(&task_id, &patch);
    match result {
        Ok(task) => {
            info!("Updated task {}", task.id);
            ctx.broadcast(DaemonEvent::task_updated(&task));
            DaemonResponse::success(id, json!(task))
        }
        Err(e) => DaemonResponse::error(id, e.into()),
    }
}

/// Handle task.delete - remove one task and echo it back
pub async fn handle_task_delete(id: u64, params: &Value, ctx: &DaemonContext) -> DaemonResponse {
    let task_id = match validation::task_path_id(params) {
        Ok(task_id) => task_id,
        Err(e) => return DaemonResponse::error(id, DaemonError::from(e)),
    };

    let result = ctx.tasks.write().await.remove(&task_id);
    match result {
        Ok(task) => {
            info!("Deleted task {}", task.id);
            ctx.broadcast(DaemonEvent::task_deleted(&task));
            DaemonResponse::success(id, json!({"message": "Task deleted", "deletedTask": task}))
        }
        Err(e) => DaemonResponse::error(id, e.into()),
    }
}
