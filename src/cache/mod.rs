//! Key-value cache with per-key expiration.
//!
//! Sessions are the only consumer; see [`crate::auth::SessionStore`].

mod memory;
mod sqlite;

use std::time::Duration;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

use crate::error::Result;

/// Cache defines the key-value interface. Expired keys behave as absent.
pub trait Cache: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value, for `ttl`.
    fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Returns true if a live key was removed.
    fn del(&self, key: &str) -> Result<bool>;

    /// Reflects the current connection state.
    fn is_alive(&self) -> bool;

    fn close(&self) -> Result<()>;
}
