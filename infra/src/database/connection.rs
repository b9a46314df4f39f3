//! MySQL pool shared by the booking, item and user repositories.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use tracing::log::LevelFilter;

use rh_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Cloneable handle over the sqlx pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connects using the URL, sizing and timeouts in `config`
    ///
    /// Statements are logged at debug, and those slower than
    /// `slow_query_threshold` milliseconds at warn.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(config.slow_query_threshold));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Could not open the MySQL pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(max_connections = config.max_connections, "MySQL pool opened");
        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trips `SELECT 1`; `Ok(false)` means the server answered oddly
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let value: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Database health check failed");
                InfrastructureError::Database(e)
            })?;
        Ok(value == 1)
    }

    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Waits for checked-out connections to return, then closes them
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL pool closed");
    }

    /// Applies the schema under `infra/migrations`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Schema migrations applied");
        Ok(())
    }
}

/// Snapshot of pool occupancy, reported by `/health`
#[derive(Debug, Clone, Copy)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
