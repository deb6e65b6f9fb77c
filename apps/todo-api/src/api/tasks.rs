//! Wires the tasks domain to MongoDB.

use axum::Router;
use domain_tasks::{MongoTaskRepository, TaskService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository =
        MongoTaskRepository::with_collection(state.db.clone(), &state.config.tasks_collection);

    handlers::router(TaskService::new(repository))
}
