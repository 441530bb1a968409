// PostgreSQL connection pool implementation

use crate::config::DatabaseConfig;
use crate::errors::DatabaseError;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper
/// Provides a managed connection pool to PostgreSQL with health checking
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    /// Create a lazily connecting pool
    ///
    /// Construction performs no I/O; the first acquisition (normally the
    /// database readiness probe) opens the first connection, bounded by
    /// the configured acquire timeout.
    #[instrument(skip(config), fields(max_connections = config.max_connections))]
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_lazy_with(options);

        info!(
            max_connections = config.max_connections,
            acquire_timeout_seconds = config.acquire_timeout_seconds,
            "Database connection pool created"
        );

        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Acquire one connection and run the liveness query
    ///
    /// The connection guard drop returns the connection to the pool on the
    /// success and failure paths alike.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        sqlx::query("SELECT NOW()")
            .execute(&mut *conn)
            .await
            .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

        tracing::debug!("Database health check passed");
        Ok(())
    }

    /// Get the current number of connections in the pool
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    /// Get the number of idle connections in the pool
    pub fn num_idle(&self) -> usize {
        self.pool.num_idle()
    }

    /// Close the connection pool gracefully
    ///
    /// Called during graceful shutdown so all connections are properly
    /// closed before the process exits.
    #[instrument(skip(self))]
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            acquire_timeout_seconds: 1,
            max_connections: 1,
            ..DatabaseConfig::default()
        }
    }

    #[tokio::test]
    async fn test_lazy_pool_creation_performs_no_io() {
        let pool = DbPool::connect_lazy(&unreachable_config());
        assert_eq!(pool.size(), 0);
        assert_eq!(pool.num_idle(), 0);
    }

    #[tokio::test]
    async fn test_health_check_fails_without_server() {
        let pool = DbPool::connect_lazy(&unreachable_config());
        let result = pool.health_check().await;
        assert!(matches!(result, Err(DatabaseError::ConnectionFailed(_))));
    }

    #[tokio::test]
    #[ignore] // Requires running PostgreSQL instance
    async fn test_health_check_with_live_database() {
        let pool = DbPool::connect_lazy(&DatabaseConfig::default());
        assert!(pool.health_check().await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires running PostgreSQL instance
    async fn test_health_check_returns_connection_to_pool() {
        let pool = DbPool::connect_lazy(&DatabaseConfig::default());
        pool.health_check().await.unwrap();
        let idle_before = pool.num_idle();

        pool.health_check().await.unwrap();

        assert_eq!(pool.num_idle(), idle_before);
    }
}
