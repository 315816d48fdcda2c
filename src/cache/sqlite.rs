use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use super::Cache;
use crate::error::{Error, Result};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    expires_at INTEGER NOT NULL  -- unix epoch milliseconds
);
CREATE INDEX IF NOT EXISTS idx_kv_expires ON kv(expires_at);
"#;

/// File-backed cache so sessions survive a restart. Lives in its own database
/// file, separate from the document store.
pub struct SqliteCache {
    conn: Mutex<Option<Connection>>,
}

impl SqliteCache {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let guard = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let conn = guard.as_ref().ok_or(Error::Unavailable("cache"))?;
        f(conn).map_err(|e| {
            tracing::warn!("cache operation failed: {e}");
            Error::Unavailable("cache")
        })
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl Cache for SqliteCache {
    fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at = now_millis().saturating_add(ttl_ms);

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value, expires_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
                params![key, value, expires_at],
            )?;
            Ok(())
        })
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = now_millis();

        self.with_conn(|conn| {
            // Purge lazily; readers never see expired rows either way.
            conn.execute("DELETE FROM kv WHERE expires_at <= ?1", params![now])?;
            conn.query_row(
                "SELECT value FROM kv WHERE key = ?1 AND expires_at > ?2",
                params![key, now],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn del(&self, key: &str) -> Result<bool> {
        let now = now_millis();

        self.with_conn(|conn| {
            let rows = conn.execute(
                "DELETE FROM kv WHERE key = ?1 AND expires_at > ?2",
                params![key, now],
            )?;
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            Ok(rows > 0)
        })
    }

    fn is_alive(&self) -> bool {
        self.with_conn(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .is_ok()
    }

    fn close(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(conn) = conn {
            conn.close().map_err(|(_, e)| Error::from(e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cache.db");

        let cache = SqliteCache::open(&path).unwrap();
        cache.set_ex("auth_abc", "user-1", HOUR).unwrap();
        cache.close().unwrap();

        let cache = SqliteCache::open(&path).unwrap();
        assert_eq!(cache.get("auth_abc").unwrap().as_deref(), Some("user-1"));
    }

    #[test]
    fn test_set_replaces_value() {
        let temp = TempDir::new().unwrap();
        let cache = SqliteCache::open(temp.path().join("cache.db")).unwrap();

        cache.set_ex("k", "one", HOUR).unwrap();
        cache.set_ex("k", "two", HOUR).unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_expiry_and_delete() {
        let temp = TempDir::new().unwrap();
        let cache = SqliteCache::open(temp.path().join("cache.db")).unwrap();

        cache.set_ex("short", "v", Duration::from_millis(10)).unwrap();
        cache.set_ex("long", "v", HOUR).unwrap();
        std::thread::sleep(Duration::from_millis(30));

        assert!(cache.get("short").unwrap().is_none());
        assert!(!cache.del("short").unwrap());

        assert!(cache.del("long").unwrap());
        assert!(!cache.del("long").unwrap());
    }

    #[test]
    fn test_closed_cache_reports_dead() {
        let temp = TempDir::new().unwrap();
        let cache = SqliteCache::open(temp.path().join("cache.db")).unwrap();
        assert!(cache.is_alive());

        cache.close().unwrap();

        assert!(!cache.is_alive());
        assert!(matches!(
            cache.set_ex("k", "v", HOUR),
            Err(Error::Unavailable("cache"))
        ));
    }
}
