//! Task Service - business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Task operations over any [`TaskRepository`].
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Validate and persist a new task. Nothing is written if validation fails.
    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Flip `completed` and return the updated task.
    ///
    /// Read-modify-write: concurrent toggles on one task are last-write-wins.
    #[instrument(skip(self))]
    pub async fn toggle_task(&self, id: &str) -> TaskResult<Task> {
        let current = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        let update = UpdateTask {
            completed: Some(!current.completed),
        };
        let task = self
            .repository
            .update(id, update)
            .await?
            // deleted between the read and the write
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        tracing::info!(task_id = %id, completed = task.completed, "Task toggled");
        Ok(task)
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: &str) -> TaskResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TaskError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTaskRepository;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: "Buy milk".to_string(),
            completed,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_short_title_without_writing() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_create().never();

        let service = TaskService::new(mock_repo);
        let result = service.create_task(CreateTask::new("  ab ")).await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_persists_valid_title() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.title == "Buy milk")
            .times(1)
            .returning(|input| {
                Ok(Task {
                    id: "t1".to_string(),
                    title: input.title,
                    completed: false,
                })
            });

        let service = TaskService::new(mock_repo);
        let created = service.create_task(CreateTask::new("Buy milk")).await.unwrap();

        assert_eq!(created.id, "t1");
        assert!(!created.completed);
    }

    #[tokio::test]
    async fn test_toggle_flips_completed() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_get_by_id()
            .withf(|id| id == "t1")
            .returning(|id| Ok(Some(task(id, false))));
        mock_repo
            .expect_update()
            .withf(|id, input| id == "t1" && input.completed == Some(true))
            .times(1)
            .returning(|id, _| Ok(Some(task(id, true))));

        let service = TaskService::new(mock_repo);
        let toggled = service.toggle_task("t1").await.unwrap();

        assert!(toggled.completed);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_not_found() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = TaskService::new(mock_repo);
        let result = service.toggle_task("missing").await;

        assert!(matches!(result, Err(TaskError::NotFound(id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_toggle_when_task_vanishes_is_not_found() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(task(id, false))));
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = TaskService::new(mock_repo);
        let result = service.toggle_task("t1").await;

        assert!(matches!(result, Err(TaskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = TaskService::new(mock_repo);
        let result = service.delete_task("missing").await;

        assert!(matches!(result, Err(TaskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Err(TaskError::Storage("connection refused".to_string())));

        let service = TaskService::new(mock_repo);
        let result = service.list_tasks().await;

        assert!(matches!(result, Err(TaskError::Storage(_))));
    }
}
