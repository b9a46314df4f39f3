//! Database configuration module

use serde::{Deserialize, Serialize};

/// Which repository implementation the server wires up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process repositories, data lost on restart
    #[default]
    Memory,
    /// MySQL through the sqlx connection pool
    #[serde(rename = "mysql")]
    MySql,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::MySql),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Repository implementation to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Run embedded migrations on startup
    #[serde(default)]
    pub run_migrations: bool,

    /// Slow query threshold in milliseconds
    #[serde(default = "default_slow_query_threshold")]
    pub slow_query_threshold: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::from("mysql://localhost:3306/renthub"),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            run_migrations: false,
            slow_query_threshold: default_slow_query_threshold(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Apply any database variables present in the environment
    pub fn overlay_env(mut self) -> Self {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.url = url;
        }
        if let Some(max) = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.max_connections = max;
        }
        if let Some(timeout) = std::env::var("DATABASE_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.connect_timeout = timeout;
        }
        if let Some(backend) = std::env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.backend = backend;
        }
        if let Ok(flag) = std::env::var("DATABASE_RUN_MIGRATIONS") {
            self.run_migrations = matches!(flag.as_str(), "1" | "true" | "yes");
        }
        self
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Select the repository implementation
    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Check if this is a production database
    pub fn is_production(&self) -> bool {
        !self.url.contains("localhost") && !self.url.contains("127.0.0.1")
    }
}

fn default_slow_query_threshold() -> u64 {
    1000 // 1 second
}
