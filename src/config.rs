use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Service configuration, read from an optional TOML file plus
/// `LITEBIN`-prefixed environment variables (`LITEBIN_STORE__BACKEND`,
/// `LITEBIN_STORE__REDIS__URL`, nesting separated by `__`). Every field has
/// a default so the server boots with no configuration at all.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Public base URL used to derive shareable paste links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Honor per-request time overrides. Never enable in production.
    #[serde(default)]
    pub test_mode: bool,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,
    #[serde(default)]
    pub redis: RedisConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    /// Process-local fallback for development and tests.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    /// Request body cap for paste creation, in bytes.
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
}

impl Config {
    /// Load configuration. With no explicit path, a `config.toml` next to the
    /// working directory is used when present and skipped otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path.to_path_buf()),
            None => config::File::with_name("config.toml").required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("LITEBIN").separator("__"))
            .build()
            .context("failed to read config")?
            .try_deserialize()
            .context("failed to deserialize config")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            host: default_host(),
            port: default_port(),
            test_mode: false,
            store: StoreConfig::default(),
            limits: Limits::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            redis: RedisConfig::default(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_content_length: default_max_content_length(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_backend() -> StoreBackend {
    StoreBackend::Redis
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_max_content_length() -> usize {
    1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_bootable() {
        let config = Config::default();

        assert_eq!(config.port, 8000);
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis.url, "redis://localhost:6379");
        assert!(!config.test_mode);
    }
}
