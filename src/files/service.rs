use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use super::content::ContentStorage;
use crate::error::{Error, Result};
use crate::store::{FileFilter, FileQuery, FileUpdate, Store};
use crate::types::{FileKind, FileRecord, NewFile, ParentRef};

/// Fixed page size for listings.
pub const PAGE_SIZE: usize = 20;

const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// An upload as submitted. Fields stay optional so validation can name what is missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, rename = "parentId")]
    pub parent: ParentRef,
    #[serde(default)]
    pub is_public: Option<bool>,
    /// Base64-encoded content; required unless the kind is `folder`.
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug)]
pub struct FileContent {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Owns file records and the mapping from record to content path.
pub struct FileService {
    store: Arc<dyn Store>,
    content: ContentStorage,
}

impl FileService {
    pub fn new(store: Arc<dyn Store>, content: ContentStorage) -> Self {
        Self { store, content }
    }

    /// Validates and stores a new record. For non-folders the bytes are fully
    /// written before the record is inserted.
    pub async fn create(&self, user_id: &str, draft: FileDraft) -> Result<FileRecord> {
        let name = draft
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::validation("Missing name"))?;
        let kind = draft
            .kind
            .as_deref()
            .and_then(FileKind::parse)
            .ok_or_else(|| Error::validation("Missing type"))?;

        let bytes = if kind.has_content() {
            let data = draft
                .data
                .filter(|d| !d.is_empty())
                .ok_or_else(|| Error::validation("Missing data"))?;
            Some(
                STANDARD
                    .decode(data.trim())
                    .map_err(|_| Error::validation("Invalid data"))?,
            )
        } else {
            None
        };

        self.check_parent(&draft.parent)?;

        let local_path = match bytes {
            Some(bytes) => {
                let path = self.content.store(&bytes).await?;
                Some(path.to_string_lossy().into_owned())
            }
            None => None,
        };

        let new_file = NewFile {
            user_id: user_id.to_string(),
            name,
            kind,
            is_public: draft.is_public.unwrap_or(false),
            parent: draft.parent,
            local_path,
        };
        let id = self.store.insert_file(&new_file)?;

        tracing::info!(file_id = %id, user_id, kind = %kind, "created file record");

        Ok(FileRecord {
            id,
            user_id: new_file.user_id,
            name: new_file.name,
            kind: new_file.kind,
            is_public: new_file.is_public,
            parent: new_file.parent,
            local_path: new_file.local_path,
        })
    }

    fn check_parent(&self, parent: &ParentRef) -> Result<()> {
        let Some(parent_id) = parent.id() else {
            return Ok(());
        };

        let parent = self
            .store
            .find_file(&FileFilter::by_id(parent_id))?
            .ok_or_else(|| Error::validation("Parent not found"))?;

        if parent.kind != FileKind::Folder {
            return Err(Error::validation("Parent is not a folder"));
        }
        Ok(())
    }

    /// Returns the record only to its owner; anything else is `NotFound`.
    pub fn get_owned(&self, user_id: &str, id: &str) -> Result<FileRecord> {
        self.store
            .find_file(&FileFilter::owned(id, user_id))?
            .ok_or(Error::NotFound)
    }

    /// Lists records directly under `parent`, in insertion order. Not scoped to
    /// the caller: any authenticated user sees every record under a parent.
    pub fn list(&self, parent: &ParentRef, page: usize) -> Result<Vec<FileRecord>> {
        self.store.list_files(&FileQuery {
            parent: Some(parent.clone()),
            skip: page.saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        })
    }

    pub fn publish(&self, user_id: &str, id: &str) -> Result<FileRecord> {
        self.set_visibility(user_id, id, true)
    }

    pub fn unpublish(&self, user_id: &str, id: &str) -> Result<FileRecord> {
        self.set_visibility(user_id, id, false)
    }

    fn set_visibility(&self, user_id: &str, id: &str, is_public: bool) -> Result<FileRecord> {
        let mut record = self.get_owned(user_id, id)?;

        let update = FileUpdate {
            is_public: Some(is_public),
        };
        if !self.store.update_file(&record.id, &update)? {
            return Err(Error::NotFound);
        }
        record.is_public = is_public;

        tracing::info!(file_id = %record.id, is_public, "changed visibility");
        Ok(record)
    }

    /// Reads a record's bytes. Public records need no identity; private ones
    /// need the owner. Folders have no content.
    pub async fn read_content(&self, viewer: Option<&str>, id: &str) -> Result<FileContent> {
        let record = self
            .store
            .find_file(&FileFilter::by_id(id))?
            .ok_or(Error::NotFound)?;

        if !record.is_public {
            let viewer = viewer.ok_or(Error::Unauthorized)?;
            if !record.is_owned_by(viewer) {
                return Err(Error::NotFound);
            }
        }

        if !record.kind.has_content() {
            return Err(Error::NoContent);
        }

        let path = record.local_path.as_deref().ok_or(Error::NotFound)?;
        let bytes = self
            .content
            .retrieve(Path::new(path))
            .await?
            .ok_or_else(|| {
                tracing::warn!(file_id = %record.id, "content missing on disk");
                Error::NotFound
            })?;

        Ok(FileContent {
            bytes,
            content_type: content_type_for(&record.name),
        })
    }
}

/// Best-effort content type from the name's extension.
#[must_use]
pub fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}
