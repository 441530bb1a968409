// Startup readiness probes and ordered dependency verification

use crate::db::{CacheClient, DbPool};
use crate::errors::StartupError;
use metrics::counter;
use tracing::{error, info, instrument};

/// Probe the database: acquire one pooled connection and run the liveness
/// query.
///
/// Failures of any kind (unreachable server, authentication, acquire
/// timeout) are logged and reported as `false`, never raised.
#[instrument(skip(pool))]
pub async fn probe_database(pool: &DbPool) -> bool {
    match pool.health_check().await {
        Ok(()) => {
            counter!("readiness_probe_success_total", "dependency" => "database").increment(1);
            info!("Database connected successfully");
            true
        }
        Err(e) => {
            counter!("readiness_probe_failure_total", "dependency" => "database").increment(1);
            error!(error = %e, "Database connection failed");
            false
        }
    }
}

/// Probe the cache: establish the session handshake and verify it with a
/// PING round-trip.
///
/// Failures are logged and reported as `false`, never raised.
#[instrument(skip(cache))]
pub async fn probe_cache(cache: &CacheClient) -> bool {
    match cache.ping().await {
        Ok(()) => {
            counter!("readiness_probe_success_total", "dependency" => "cache").increment(1);
            info!("Redis connected successfully");
            true
        }
        Err(e) => {
            counter!("readiness_probe_failure_total", "dependency" => "cache").increment(1);
            error!(error = %e, "Redis connection failed");
            false
        }
    }
}

/// Run the startup probes strictly in sequence, failing fast
///
/// The cache probe is never attempted when the database probe fails; the
/// caller must not serve traffic unless this returns `Ok`.
#[instrument(skip_all)]
pub async fn verify_dependencies(
    pool: &DbPool,
    cache: &CacheClient,
) -> Result<(), StartupError> {
    if !probe_database(pool).await {
        return Err(StartupError::DependencyUnavailable {
            dependency: "database",
        });
    }

    if !probe_cache(cache).await {
        return Err(StartupError::DependencyUnavailable {
            dependency: "cache",
        });
    }

    info!("All dependency probes passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, RedisConfig};

    fn unreachable_database() -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            acquire_timeout_seconds: 1,
            ..DatabaseConfig::default()
        }
    }

    fn unreachable_redis() -> RedisConfig {
        RedisConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            password: None,
        }
    }

    #[tokio::test]
    async fn test_database_probe_reports_failure_for_unreachable_server() {
        let pool = DbPool::connect_lazy(&unreachable_database());
        assert!(!probe_database(&pool).await);
    }

    #[tokio::test]
    async fn test_cache_probe_reports_failure_for_unreachable_server() {
        let cache = CacheClient::new(&unreachable_redis()).unwrap();
        assert!(!probe_cache(&cache).await);
        assert!(!cache.is_connected());
    }

    #[tokio::test]
    async fn test_verification_stops_at_the_database_probe() {
        let pool = DbPool::connect_lazy(&unreachable_database());
        let cache = CacheClient::new(&unreachable_redis()).unwrap();

        let result = verify_dependencies(&pool, &cache).await;

        assert!(matches!(
            result,
            Err(StartupError::DependencyUnavailable {
                dependency: "database"
            })
        ));
        // The cache handshake must never have been attempted.
        assert!(!cache.is_connected());
    }

    #[tokio::test]
    #[ignore] // Requires running PostgreSQL and Redis instances
    async fn test_verification_passes_with_live_dependencies() {
        let pool = DbPool::connect_lazy(&DatabaseConfig::default());
        let cache = CacheClient::new(&RedisConfig::default()).unwrap();
        assert!(verify_dependencies(&pool, &cache).await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires running PostgreSQL instance (Redis must be down)
    async fn test_verification_stops_at_the_cache_probe() {
        let pool = DbPool::connect_lazy(&DatabaseConfig::default());
        let cache = CacheClient::new(&unreachable_redis()).unwrap();

        let result = verify_dependencies(&pool, &cache).await;

        assert!(matches!(
            result,
            Err(StartupError::DependencyUnavailable {
                dependency: "cache"
            })
        ));
    }
}
