use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{Cache, MemoryCache, SqliteCache};
use crate::error::Result;

/// Where sessions are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    /// Process-local; sessions are lost on restart.
    Memory,
    /// A separate SQLite file.
    Sqlite(PathBuf),
}

impl CacheBackend {
    pub fn connect(&self) -> Result<Arc<dyn Cache>> {
        Ok(match self {
            Self::Memory => Arc::new(MemoryCache::new()),
            Self::Sqlite(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Arc::new(SqliteCache::open(path)?)
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database holding users and file records.
    pub db_path: PathBuf,
    /// Root directory for uploaded content.
    pub folder_path: PathBuf,
    pub cache: CacheBackend,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            db_path: PathBuf::from("./data/files_manager.db"),
            folder_path: PathBuf::from("/tmp/files_manager"),
            cache: CacheBackend::Sqlite(PathBuf::from("./data/cache.db")),
        }
    }
}
