mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Selects a single user.
#[derive(Debug, Clone)]
pub enum UserFilter {
    Id(String),
    Email(String),
}

/// Selects a single file record by id, optionally scoped to an owner.
#[derive(Debug, Clone)]
pub struct FileFilter {
    pub id: String,
    pub user_id: Option<String>,
}

impl FileFilter {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: None,
        }
    }

    pub fn owned(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: Some(user_id.into()),
        }
    }
}

/// Field-level update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct FileUpdate {
    pub is_public: Option<bool>,
}

/// Paginated listing in insertion order, with an optional parent equality filter.
#[derive(Debug, Clone)]
pub struct FileQuery {
    pub parent: Option<ParentRef>,
    pub skip: usize,
    pub limit: usize,
}

/// Store defines the document store interface for users and file records.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // User operations
    fn find_user(&self, filter: &UserFilter) -> Result<Option<User>>;
    /// Inserts a user and returns its assigned id. Fails with `AlreadyExists`
    /// when the email is taken.
    fn insert_user(&self, user: &NewUser) -> Result<String>;
    fn count_users(&self) -> Result<u64>;

    // File operations
    fn find_file(&self, filter: &FileFilter) -> Result<Option<FileRecord>>;
    fn insert_file(&self, file: &NewFile) -> Result<String>;
    /// Returns false when no record matched the id.
    fn update_file(&self, id: &str, update: &FileUpdate) -> Result<bool>;
    fn list_files(&self, query: &FileQuery) -> Result<Vec<FileRecord>>;
    fn count_files(&self) -> Result<u64>;

    /// Probes the live connection.
    fn is_alive(&self) -> bool;

    fn close(&self) -> Result<()>;
}
