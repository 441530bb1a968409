// Configuration management with layered configuration (file, env)

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default configuration
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment-specific configuration
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.apply_env_overrides(&std::env::vars().collect());
        Ok(settings)
    }

    /// Apply the flat variable names used by deployment environments
    /// (`PORT`, `DB_HOST`, ...), overriding anything loaded from files or
    /// `APP__`-prefixed variables.
    pub fn apply_env_overrides(&mut self, vars: &HashMap<String, String>) {
        if let Some(value) = vars.get("PORT") {
            if let Some(port) = parse_port("PORT", value) {
                self.server.port = port;
            }
        }

        if let Some(host) = vars.get("DB_HOST") {
            self.database.host = host.clone();
        }
        if let Some(value) = vars.get("DB_PORT") {
            if let Some(port) = parse_port("DB_PORT", value) {
                self.database.port = port;
            }
        }
        if let Some(name) = vars.get("DB_NAME") {
            self.database.name = name.clone();
        }
        if let Some(user) = vars.get("DB_USER") {
            self.database.user = user.clone();
        }
        if let Some(password) = vars.get("DB_PASSWORD") {
            self.database.password = password.clone();
        }

        if let Some(host) = vars.get("REDIS_HOST") {
            self.redis.host = host.clone();
        }
        if let Some(value) = vars.get("REDIS_PORT") {
            if let Some(port) = parse_port("REDIS_PORT", value) {
                self.redis.port = port;
            }
        }
        if let Some(password) = vars.get("REDIS_PASSWORD") {
            self.redis.password = Some(password.clone());
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        // Validate server config
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        // Validate database config
        if self.database.host.is_empty() {
            return Err("Database host cannot be empty".to_string());
        }
        if self.database.port == 0 {
            return Err("Database port must be greater than 0".to_string());
        }
        if self.database.name.is_empty() {
            return Err("Database name cannot be empty".to_string());
        }
        if self.database.user.is_empty() {
            return Err("Database user cannot be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.database.min_connections > self.database.max_connections {
            return Err("Database min_connections cannot exceed max_connections".to_string());
        }
        if self.database.acquire_timeout_seconds == 0 {
            return Err("Database acquire_timeout_seconds must be greater than 0".to_string());
        }

        // Validate Redis config
        if self.redis.host.is_empty() {
            return Err("Redis host cannot be empty".to_string());
        }
        if self.redis.port == 0 {
            return Err("Redis port must be greater than 0".to_string());
        }

        Ok(())
    }
}

fn parse_port(variable: &str, value: &str) -> Option<u16> {
    match value.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!(variable, value, "Ignoring unparsable port override");
            None
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            redis: RedisConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "glucose_db".to_string(),
            user: "glucose_user".to_string(),
            password: "glucose_pass".to_string(),
            max_connections: 20,
            min_connections: 0,
            acquire_timeout_seconds: 2,
            idle_timeout_seconds: 30,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            password: None,
        }
    }
}
