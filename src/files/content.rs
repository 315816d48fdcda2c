use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::Result;

/// Raw byte storage under a root directory. Objects are named by fresh UUIDs and
/// know nothing about the records that point at them.
#[derive(Debug, Clone)]
pub struct ContentStorage {
    root: PathBuf,
}

impl ContentStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes `data` durably and returns the path it now lives at. The bytes are
    /// synced and renamed into place before this returns.
    pub async fn store(&self, data: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).await?;

        let name = Uuid::new_v4().to_string();
        let temp_path = self.root.join(format!(".{name}.tmp"));
        let final_path = self.root.join(&name);

        persist(&temp_path, &final_path, data).await?;

        Ok(final_path)
    }

    /// Reads the bytes at `path`. A missing file is `Ok(None)`.
    pub async fn retrieve(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Writes and syncs `data` at `temp_path`, then renames it to `final_path`. On any
/// failure the temp file is removed.
async fn persist(temp_path: &Path, final_path: &Path, data: &[u8]) -> std::io::Result<()> {
    let result = async {
        let mut temp_file = File::create(temp_path).await?;
        temp_file.write_all(data).await?;
        temp_file.sync_all().await?;
        drop(temp_file);
        fs::rename(temp_path, final_path).await
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(temp_path).await;
    }
    result
}
