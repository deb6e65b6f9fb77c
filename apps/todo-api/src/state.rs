//! Shared application state passed to route builders and handlers.

use mongodb::{Client, Database};

/// Cloning is cheap: the driver client shares its connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database selected by `MONGODB_DATABASE`
    pub db: Database,
}
