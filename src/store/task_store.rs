//! In-memory task store.
//!
//! Tasks are kept in insertion order. Lookups are linear over the canonical
//! `TaskId`, which keeps listing order trivially stable.

use log::debug;

use crate::domain::{Task, TaskId, TaskPatch};
use crate::error::StoreError;

/// TaskStore holds tasks keyed by their caller-supplied id.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Insert a new task. Fails if a task with the same id exists; the
    /// existing record is left untouched.
    pub fn insert(&mut self, task: Task) -> Result<Task, StoreError> {
        if self.position(&task.id).is_some() {
            return Err(StoreError::DuplicateKey(task.id));
        }
        debug!("Inserting task {}", task.id);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// All tasks in insertion order.
    pub fn list_all(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Get a task by id.
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.position(id).map(|i| &self.tasks[i])
    }

    /// Overwrite the fields present in `patch` and return the updated task.
    pub fn update(&mut self, id: &TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        let index = self.position(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let task = &mut self.tasks[index];
        patch.apply(task);
        debug!("Updated task {}", id);
        Ok(task.clone())
    }

    /// Remove a task and return the removed record.
    pub fn remove(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        let index = self.position(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        debug!("Removing task {}", id);
        Ok(self.tasks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
