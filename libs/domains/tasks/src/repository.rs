use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task, UpdateTask};

/// Data access for tasks.
///
/// Ids are opaque strings. An id the backend cannot parse is treated the same
/// as an id that does not exist: `Ok(None)` / `Ok(false)`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks in the store's natural order
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Persist a new, not completed task
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>>;

    /// Apply `input` and return the updated task, or `None` if it does not exist
    async fn update(&self, id: &str, input: UpdateTask) -> TaskResult<Option<Task>>;

    /// Returns `false` if nothing was deleted
    async fn delete(&self, id: &str) -> TaskResult<bool>;
}
