//! Ephemeral pastebin: shareable text snippets with optional time-to-live
//! and view-count limits, backed by a Redis-shaped store.

use axum::extract::FromRef;
use tracing::warn;

pub mod clock;
pub mod commands;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod pages;
pub mod store;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use crate::clock::Clock;
use crate::config::{Config, StoreBackend};
use crate::store::{AnyStore, MemoryStore, RedisStore};

/// Shared state handed to every request handler.
#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub store: AnyStore,
    pub clock: Clock,
}

impl App {
    /// Connect the configured store backend and assemble the shared state.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let store = match config.store.backend {
            StoreBackend::Redis => RedisStore::connect(&config.store.redis.url).await?.into(),
            StoreBackend::Memory => {
                warn!("using the in-memory store, pastes will not survive a restart");
                MemoryStore::new().into()
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Assemble state around an existing store. Used by tests and by
    /// [`App::connect`].
    pub fn with_store(config: Config, store: AnyStore) -> Self {
        if config.test_mode {
            warn!("test mode enabled, honoring {} overrides", clock::X_TEST_NOW_MS);
        }

        let clock = Clock::new(config.test_mode);

        Self { config, store, clock }
    }
}
