//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Bearer token verification settings
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `events` - Live booking feed settings
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod events;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::{DatabaseConfig, StorageBackend};
pub use environment::{Environment, LoggingConfig};
pub use events::EventsConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Live booking feed configuration
    #[serde(default)]
    pub events: EventsConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            events: EventsConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 5000),
            database: DatabaseConfig::new("mysql://localhost:3306/renthub_dev"),
            auth: AuthConfig::default(),
            events: EventsConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 5000),
            database: DatabaseConfig::new("mysql://prod-db:3306/renthub")
                .with_max_connections(50)
                .with_backend(StorageBackend::MySql),
            auth: AuthConfig::default(),
            events: EventsConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Starts from the environment preset and overlays every variable the
    /// sub-configurations understand.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.server = config.server.overlay_env();
        config.database = config.database.overlay_env();
        config.auth = AuthConfig::from_env();
        config.events = EventsConfig::from_env();
        config
    }
}
