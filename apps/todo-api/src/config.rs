use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

pub const COLLECTION_ENV: &str = "MONGODB_COLLECTION";
pub const DEFAULT_COLLECTION: &str = domain_tasks::mongodb::DEFAULT_COLLECTION;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding task documents
    pub tasks_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let tasks_collection = tasks_collection_from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            tasks_collection,
        })
    }
}

fn tasks_collection_from_env() -> Result<String, ConfigError> {
    let name = env_or_default(COLLECTION_ENV, DEFAULT_COLLECTION);
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: COLLECTION_ENV.to_string(),
            details: "collection name cannot be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "APP_ENV",
        "PORT",
        "MONGODB_URL",
        "MONGO_URL",
        "MONGODB_DATABASE",
        "MONGO_DATABASE",
        COLLECTION_ENV,
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.server.port, 5000);
            assert_eq!(config.mongodb.database(), "to-doApp");
            assert_eq!(config.tasks_collection, "tasks");
            assert_eq!(config.environment, Environment::Development);
            assert_eq!(config.app.name, "todo-api");
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                ("PORT", Some("8080")),
                ("MONGODB_DATABASE", Some("todos")),
                (COLLECTION_ENV, Some(" items ")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.environment.is_production());
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.mongodb.database(), "todos");
                assert_eq!(config.tasks_collection, "items");
            },
        );
    }

    #[test]
    fn test_blank_collection_is_rejected() {
        temp_env::with_var(COLLECTION_ENV, Some("  "), || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        temp_env::with_var("PORT", Some("not-a-port"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
