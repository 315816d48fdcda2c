use std::sync::Arc;
use std::time::Duration;

use crate::cache::Cache;
use crate::error::{Error, Result};

/// Sessions live for 24 hours from login.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const KEY_PREFIX: &str = "auth_";

/// Maps session tokens to user ids on top of a key-value cache, using
/// `auth_<token>` keys. Cache failures surface as `Unavailable`.
#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<dyn Cache>,
}

impl SessionStore {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }

    pub fn put(&self, token: &str, user_id: &str, ttl: Duration) -> Result<()> {
        self.cache
            .set_ex(&Self::key(token), user_id, ttl)
            .map_err(unavailable)
    }

    pub fn get(&self, token: &str) -> Result<Option<String>> {
        self.cache.get(&Self::key(token)).map_err(unavailable)
    }

    /// Returns true if a live session was removed.
    pub fn delete(&self, token: &str) -> Result<bool> {
        self.cache.del(&Self::key(token)).map_err(unavailable)
    }

    pub fn is_alive(&self) -> bool {
        self.cache.is_alive()
    }

    pub fn close(&self) -> Result<()> {
        self.cache.close()
    }
}

fn unavailable(e: Error) -> Error {
    match e {
        Error::Unavailable(_) => e,
        other => {
            tracing::warn!("session cache error: {other}");
            Error::Unavailable("cache")
        }
    }
}
