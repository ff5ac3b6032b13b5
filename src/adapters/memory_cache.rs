//! In-process TTL cache adapter.
//!
//! Mutex-guarded map; entries expire on read. A poisoned lock degrades to
//! always-miss rather than propagating a panic across requests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::ports::cache_port::ResultCache;

struct CacheEntry {
    payload: String,
    expires_at: Instant,
}

pub struct MemoryCache {
    entries: std::sync::Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: &str, payload: &str, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    payload: payload.to_string(),
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }
}
