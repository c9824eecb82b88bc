use std::collections::HashMap;

pub mod keys;
pub mod memory;
pub mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;

/// Record store with Redis semantics: a record is a flat map of string
/// fields, numeric fields support server-side atomic increments, and expiry
/// is a per-key timer owned by the store.
pub(crate) trait Store {
    /// Write every field of a record, creating or overwriting it.
    async fn put(&mut self, key: &str, fields: &[(String, String)]) -> crate::ApiResult<()>;

    /// Read all fields of a record. Absent keys read as `None`.
    async fn get(&mut self, key: &str) -> crate::ApiResult<Option<HashMap<String, String>>>;

    /// Atomically add one to a numeric field, creating it at zero first when
    /// absent, and return the post-increment value.
    async fn incr(&mut self, key: &str, field: &str) -> crate::ApiResult<i64>;

    /// Arm or rewind the record's expiry timer.
    async fn expire(&mut self, key: &str, seconds: u64) -> crate::ApiResult<()>;

    /// Drop a record immediately.
    async fn delete(&mut self, key: &str) -> crate::ApiResult<()>;

    /// Liveness check against the backend.
    async fn ping(&mut self) -> crate::ApiResult<bool>;
}

#[derive(Clone)]
pub enum AnyStore {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl Store for AnyStore {
    async fn put(&mut self, key: &str, fields: &[(String, String)]) -> crate::ApiResult<()> {
        match self {
            AnyStore::Redis(redis) => redis.put(key, fields).await,
            AnyStore::Memory(memory) => memory.put(key, fields).await,
        }
    }

    async fn get(&mut self, key: &str) -> crate::ApiResult<Option<HashMap<String, String>>> {
        match self {
            AnyStore::Redis(redis) => redis.get(key).await,
            AnyStore::Memory(memory) => memory.get(key).await,
        }
    }

    async fn incr(&mut self, key: &str, field: &str) -> crate::ApiResult<i64> {
        match self {
            AnyStore::Redis(redis) => redis.incr(key, field).await,
            AnyStore::Memory(memory) => memory.incr(key, field).await,
        }
    }

    async fn expire(&mut self, key: &str, seconds: u64) -> crate::ApiResult<()> {
        match self {
            AnyStore::Redis(redis) => redis.expire(key, seconds).await,
            AnyStore::Memory(memory) => memory.expire(key, seconds).await,
        }
    }

    async fn delete(&mut self, key: &str) -> crate::ApiResult<()> {
        match self {
            AnyStore::Redis(redis) => redis.delete(key).await,
            AnyStore::Memory(memory) => memory.delete(key).await,
        }
    }

    async fn ping(&mut self) -> crate::ApiResult<bool> {
        match self {
            AnyStore::Redis(redis) => redis.ping().await,
            AnyStore::Memory(memory) => memory.ping().await,
        }
    }
}

impl From<RedisStore> for AnyStore {
    fn from(value: RedisStore) -> Self {
        AnyStore::Redis(value)
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(value: MemoryStore) -> Self {
        AnyStore::Memory(value)
    }
}
