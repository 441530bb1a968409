// Error handling framework

use thiserror::Error;

/// Database-specific errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Database health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Cache (Redis) errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid cache configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Cache ping failed: {0}")]
    PingFailed(String),

    #[error("Unexpected ping response: {0}")]
    UnexpectedResponse(String),
}

/// Startup orchestration errors
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("{dependency} readiness probe failed")]
    DependencyUnavailable { dependency: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
