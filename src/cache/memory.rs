use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::Cache;
use crate::error::{Error, Result};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process cache. Expired entries are swept on every write and read.
pub struct MemoryCache {
    entries: Mutex<Option<HashMap<String, Entry>>>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Some(HashMap::new())),
        }
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, Entry>) -> T) -> Result<T> {
        let mut guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_mut() {
            Some(entries) => Ok(f(entries)),
            None => Err(Error::Unavailable("cache")),
        }
    }
}

fn sweep(entries: &mut HashMap<String, Entry>) {
    let now = Instant::now();
    entries.retain(|_, entry| entry.expires_at > now);
}

impl Cache for MemoryCache {
    fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.with_entries(|entries| {
            sweep(entries);
            entries.insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    expires_at: Instant::now() + ttl,
                },
            );
        })
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| {
            sweep(entries);
            entries.get(key).map(|entry| entry.value.clone())
        })
    }

    fn del(&self, key: &str) -> Result<bool> {
        self.with_entries(|entries| {
            entries
                .remove(key)
                .is_some_and(|entry| entry.expires_at > Instant::now())
        })
    }

    fn is_alive(&self) -> bool {
        self.entries
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn close(&self) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        Ok(())
    }
}
