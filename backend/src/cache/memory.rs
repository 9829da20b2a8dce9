use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::Cache;

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

/// In-process TTL cache. Expired entries are dropped lazily on access.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().ok()?;
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: serde_json::Value, ttl_ms: u64) {
        let Ok(mut entries) = self.entries.lock() else {
            log::error!("Cache lock poisoned, dropping write for {}", key);
            return;
        };
        let now = Instant::now();

        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + Duration::from_millis(ttl_ms),
            },
        );
    }
}
