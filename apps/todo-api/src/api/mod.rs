//! API routes
//!
//! Mounted at the root by `axum_helpers::create_router`.

pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/tasks", tasks::router(state))
        .merge(health::router(state.clone()))
}
