use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::Store;

/// Process-local store with the same observable behavior as the Redis
/// backend: per-record expiry timers and atomic field increments. Pastes
/// only live as long as the process, which is fine for development and is
/// what the test suite runs against.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<String, Record>>,
}

#[derive(Default)]
struct Record {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl Record {
    fn is_expired(&self) -> bool {
        matches!(self.expires_at, Some(deadline) if Instant::now() >= deadline)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no records are held, expired or not.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn deadline(&self, key: &str) -> Option<Instant> {
        self.records.get(key).and_then(|record| record.expires_at)
    }
}

impl Store for MemoryStore {
    async fn put(&mut self, key: &str, fields: &[(String, String)]) -> crate::ApiResult<()> {
        let mut record = self.records.entry(key.to_string()).or_default();
        if record.is_expired() {
            *record = Record::default();
        }

        for (field, value) in fields {
            record.fields.insert(field.clone(), value.clone());
        }

        Ok(())
    }

    async fn get(&mut self, key: &str) -> crate::ApiResult<Option<HashMap<String, String>>> {
        {
            let Some(record) = self.records.get(key) else {
                return Ok(None);
            };
            if !record.is_expired() {
                return Ok(Some(record.fields.clone()));
            }
        }

        // deadline passed; reap outside the shard guard
        self.records.remove(key);
        Ok(None)
    }

    async fn incr(&mut self, key: &str, field: &str) -> crate::ApiResult<i64> {
        // the entry guard holds the shard lock, which is what makes the
        // read-modify-write atomic across clones
        let mut record = self.records.entry(key.to_string()).or_default();
        if record.is_expired() {
            *record = Record::default();
        }

        let value = record
            .fields
            .get(field)
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(0)
            + 1;
        record.fields.insert(field.to_string(), value.to_string());

        Ok(value)
    }

    async fn expire(&mut self, key: &str, seconds: u64) -> crate::ApiResult<()> {
        if let Some(mut record) = self.records.get_mut(key) {
            // deadlines past what the clock can represent never fire
            record.expires_at = Instant::now().checked_add(Duration::from_secs(seconds));
        }

        Ok(())
    }

    async fn delete(&mut self, key: &str) -> crate::ApiResult<()> {
        self.records.remove(key);
        Ok(())
    }

    async fn ping(&mut self) -> crate::ApiResult<bool> {
        Ok(true)
    }
}
