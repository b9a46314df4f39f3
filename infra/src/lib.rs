//! # Infrastructure Layer
//!
//! Concrete persistence for the RentHub backend: the MySQL connection pool,
//! embedded schema migrations, and SQLx implementations of the core
//! repository traits.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use std::sync::Arc;

use rh_shared::config::DatabaseConfig;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
use database::{DatabasePool, MySqlBookingRepository, MySqlItemRepository, MySqlUserRepository};

/// MySQL-backed repositories sharing one pool
#[cfg(feature = "mysql")]
#[derive(Clone)]
pub struct InfrastructureServices {
    pub pool: DatabasePool,
    pub bookings: Arc<MySqlBookingRepository>,
    pub items: Arc<MySqlItemRepository>,
    pub users: Arc<MySqlUserRepository>,
}

/// Connects to MySQL and wires the repositories
///
/// Runs the embedded migrations first when `run_migrations` is set.
#[cfg(feature = "mysql")]
pub async fn initialize(config: &DatabaseConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let pool = DatabasePool::new(config).await?;
    if config.run_migrations {
        pool.run_migrations().await?;
    }

    let sql = pool.get_pool().clone();
    let services = InfrastructureServices {
        bookings: Arc::new(MySqlBookingRepository::new(sql.clone())),
        items: Arc::new(MySqlItemRepository::new(sql.clone())),
        users: Arc::new(MySqlUserRepository::new(sql)),
        pool,
    };

    tracing::info!("Infrastructure services initialized successfully");
    Ok(services)
}

/// Database settings from the environment, reading `.env` when present
pub fn load_database_config() -> DatabaseConfig {
    dotenvy::dotenv().ok();
    DatabaseConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
