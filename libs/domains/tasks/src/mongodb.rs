//! MongoDB implementation of TaskRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Default collection name.
pub const DEFAULT_COLLECTION: &str = "tasks";

/// Stored shape of a task. `_id` is assigned by the server on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    #[serde(default)]
    completed: bool,
}

impl From<TaskDocument> for Task {
    fn from(doc: TaskDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: doc.title,
            completed: doc.completed,
        }
    }
}

/// MongoDB implementation of the TaskRepository
#[derive(Clone)]
pub struct MongoTaskRepository {
    collection: Collection<TaskDocument>,
}

impl MongoTaskRepository {
    /// Use the `tasks` collection of `db`.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoTaskRepository::new(client.database("to-doApp"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<TaskDocument>(collection_name),
        }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// `None` when `id` is not a valid ObjectId; such an id cannot match any document.
    fn id_filter(id: &str) -> Option<Document> {
        ObjectId::parse_str(id)
            .ok()
            .map(|oid| doc! { "_id": oid })
    }

    fn build_set(input: &UpdateTask) -> Document {
        let mut set = doc! {};
        if let Some(completed) = input.completed {
            set.insert("completed", completed);
        }
        set
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<TaskDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Task::from).collect())
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let doc = TaskDocument {
            id: None,
            title: input.title,
            completed: false,
        };

        let result = self.collection.insert_one(&doc).await?;
        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            TaskError::Storage(format!(
                "insert returned a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;

        let task = Task::from(TaskDocument {
            id: Some(oid),
            ..doc
        });
        tracing::info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(None);
        };
        let doc = self.collection.find_one(filter).await?;
        Ok(doc.map(Task::from))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: &str, input: UpdateTask) -> TaskResult<Option<Task>> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(None);
        };

        let set = Self::build_set(&input);
        if set.is_empty() {
            return Ok(self.collection.find_one(filter).await?.map(Task::from));
        }

        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(task_id = %id, "Task updated");
        }
        Ok(updated.map(Task::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> TaskResult<bool> {
        let Some(filter) = Self::id_filter(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(filter).await?;
        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(task_id = %id, "Task deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_rejects_malformed_ids() {
        assert!(MongoTaskRepository::id_filter("not-an-object-id").is_none());
        assert!(MongoTaskRepository::id_filter("").is_none());
        assert!(MongoTaskRepository::id_filter("65f1c0ffee0123456789abcd").is_some());
    }

    #[test]
    fn test_build_set() {
        let set = MongoTaskRepository::build_set(&UpdateTask {
            completed: Some(true),
        });
        assert_eq!(set, doc! { "completed": true });
        assert!(MongoTaskRepository::build_set(&UpdateTask::default()).is_empty());
    }

    #[test]
    fn test_document_to_task_uses_hex_id() {
        let oid = ObjectId::new();
        let task = Task::from(TaskDocument {
            id: Some(oid),
            title: "Buy milk".into(),
            completed: true,
        });
        assert_eq!(task.id, oid.to_hex());
        assert!(task.completed);
    }

    #[test]
    fn test_new_document_omits_id() {
        let doc = mongodb::bson::to_document(&TaskDocument {
            id: None,
            title: "Buy milk".into(),
            completed: false,
        })
        .unwrap();
        assert!(!doc.contains_key("_id"));
    }
}
