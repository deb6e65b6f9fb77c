//! In-memory implementation of TaskRepository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Thread-safe, insertion-ordered task store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> TaskError {
    TaskError::Storage(format!("task store lock poisoned: {err}"))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.clone())
    }

    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = Task {
            id: Uuid::now_v7().to_string(),
            title: input.title,
            completed: false,
        };

        let mut tasks = self.tasks.write().map_err(poisoned)?;
        tasks.push(task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, id: &str, input: UpdateTask) -> TaskResult<Option<Task>> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(completed) = input.completed {
            task.completed = completed;
        }
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: &str) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() != before)
    }
}
