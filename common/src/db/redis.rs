// Redis cache client and health check

use crate::config::RedisConfig;
use crate::errors::CacheError;
use redis::aio::ConnectionManager;
use redis::{Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

/// Long-lived Redis session handle
///
/// Construction performs no I/O; the session is established on first use
/// (normally the cache readiness probe) and shared by all clones for the
/// lifetime of the process.
#[derive(Clone)]
pub struct CacheClient {
    client: Client,
    manager: Arc<OnceCell<ConnectionManager>>,
}

impl CacheClient {
    pub fn new(config: &RedisConfig) -> Result<Self, CacheError> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: RedisConnectionInfo {
                password: config.password.clone(),
                ..Default::default()
            },
        };

        let client =
            Client::open(info).map_err(|e| CacheError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            client,
            manager: Arc::new(OnceCell::new()),
        })
    }

    /// Whether the connect handshake has completed
    pub fn is_connected(&self) -> bool {
        self.manager.initialized()
    }

    async fn manager(&self) -> Result<&ConnectionManager, CacheError> {
        self.manager
            .get_or_try_init(|| async {
                info!("Establishing Redis session");
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| CacheError::ConnectionFailed(e.to_string()))
            })
            .await
    }

    /// Get a handle to the shared session, connecting on first use
    pub async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        Ok(self.manager().await?.clone())
    }

    /// Connect if needed and verify the session with a PING round-trip
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::PingFailed(e.to_string()))?;

        if response != "PONG" {
            return Err(CacheError::UnexpectedResponse(response));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> RedisConfig {
        RedisConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            password: None,
        }
    }

    #[test]
    fn test_client_creation_performs_no_io() {
        let client = CacheClient::new(&unreachable_config()).unwrap();
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_ping_fails_without_server() {
        let client = CacheClient::new(&unreachable_config()).unwrap();
        let result = client.ping().await;
        assert!(matches!(result, Err(CacheError::ConnectionFailed(_))));
        assert!(!client.is_connected());
    }

    #[tokio::test]
    #[ignore] // Requires running Redis instance
    async fn test_ping_with_live_cache() {
        let client = CacheClient::new(&RedisConfig::default()).unwrap();
        assert!(client.ping().await.is_ok());
        assert!(client.is_connected());
    }

    #[tokio::test]
    #[ignore] // Requires running Redis instance
    async fn test_clones_share_the_session() {
        let client = CacheClient::new(&RedisConfig::default()).unwrap();
        let clone = client.clone();
        clone.ping().await.unwrap();
        assert!(client.is_connected());
    }
}
