use serde::Serialize;

use super::{FileKind, ParentRef};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
}

/// A stored file, image or folder description. Serializes as the public view,
/// which never includes the local content path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub is_public: bool,
    #[serde(rename = "parentId")]
    pub parent: ParentRef,
    #[serde(skip)]
    pub local_path: Option<String>,
}

impl FileRecord {
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewFile {
    pub user_id: String,
    pub name: String,
    pub kind: FileKind,
    pub is_public: bool,
    pub parent: ParentRef,
    pub local_path: Option<String>,
}
