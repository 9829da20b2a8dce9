pub mod memory;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub use memory::MemoryCache;

/// Default entry lifetime: 5 minutes
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Key-value store with per-entry expiry shared by all requests.
///
/// Implementations must be safe to call concurrently; a lost race between
/// two writers of the same key is acceptable.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<serde_json::Value>;

    async fn set(&self, key: &str, value: serde_json::Value, ttl_ms: u64);
}

pub fn streak_stats_key(username: &str) -> String {
    format!("streak_stats_{}", username)
}

pub fn contributions_key(username: &str) -> String {
    format!("contributions_{}", username)
}

pub fn user_stats_key(username: &str) -> String {
    format!("user_stats_{}", username)
}

pub fn top_languages_key(username: &str) -> String {
    format!("top_languages_{}", username)
}

/// Read and decode a cached value. Entries that no longer decode are treated as misses.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> Option<T> {
    let value = cache.get(key).await?;
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("Ignoring undecodable cache entry {}: {}", key, e);
            None
        }
    }
}

pub async fn set_json<T: Serialize>(cache: &dyn Cache, key: &str, value: &T, ttl_ms: u64) {
    match serde_json::to_value(value) {
        Ok(json) => cache.set(key, json, ttl_ms).await,
        Err(e) => log::warn!("Failed to encode cache entry {}: {}", key, e),
    }
}
