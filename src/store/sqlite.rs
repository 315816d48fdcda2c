use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use super::schema::SCHEMA;
use super::{FileFilter, FileQuery, FileUpdate, Store, UserFilter};
use crate::error::{Error, Result};
use crate::types::*;

const FILE_COLUMNS: &str = "id, user_id, name, type, is_public, parent_id, local_path";

pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Runs `f` against the open connection, or fails with `Unavailable` once closed.
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(Error::Unavailable("database")),
        }
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
    })
}

fn file_from_row(row: &Row<'_>) -> rusqlite::Result<FileRecord> {
    let kind: String = row.get(3)?;
    let kind = FileKind::parse(&kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown file type '{kind}'").into(),
        )
    })?;

    Ok(FileRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        kind,
        is_public: row.get(4)?,
        parent: ParentRef::from_column(row.get(5)?),
        local_path: row.get(6)?,
    })
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
    }

    // User operations

    fn find_user(&self, filter: &UserFilter) -> Result<Option<User>> {
        let (sql, value) = match filter {
            UserFilter::Id(id) => ("SELECT id, email, password FROM users WHERE id = ?1", id),
            UserFilter::Email(email) => (
                "SELECT id, email, password FROM users WHERE email = ?1",
                email,
            ),
        };

        self.with_conn(|conn| {
            conn.query_row(sql, params![value], user_from_row)
                .optional()
                .map_err(Error::from)
        })
    }

    fn insert_user(&self, user: &NewUser) -> Result<String> {
        let id = Uuid::new_v4().to_string();

        self.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO users (id, email, password) VALUES (?1, ?2, ?3)",
                params![id, user.email, user.password_hash],
            );

            match result {
                Ok(_) => Ok(()),
                Err(e) if is_constraint_violation(&e) => Err(Error::AlreadyExists),
                Err(e) => Err(Error::from(e)),
            }
        })?;

        Ok(id)
    }

    fn count_users(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }

    // File operations

    fn find_file(&self, filter: &FileFilter) -> Result<Option<FileRecord>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {FILE_COLUMNS} FROM files
                     WHERE id = ?1 AND (?2 IS NULL OR user_id = ?2)"
                ),
                params![filter.id, filter.user_id],
                file_from_row,
            )
            .optional()
            .map_err(Error::from)
        })
    }

    fn insert_file(&self, file: &NewFile) -> Result<String> {
        let id = Uuid::new_v4().to_string();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO files (id, user_id, name, type, is_public, parent_id, local_path)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    file.user_id,
                    file.name,
                    file.kind.as_str(),
                    file.is_public,
                    file.parent.id(),
                    file.local_path,
                ],
            )?;
            Ok(())
        })?;

        Ok(id)
    }

    fn update_file(&self, id: &str, update: &FileUpdate) -> Result<bool> {
        self.with_conn(|conn| {
            let rows = conn.execute(
                "UPDATE files SET is_public = COALESCE(?1, is_public) WHERE id = ?2",
                params![update.is_public, id],
            )?;
            Ok(rows > 0)
        })
    }

    fn list_files(&self, query: &FileQuery) -> Result<Vec<FileRecord>> {
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let skip = i64::try_from(query.skip).unwrap_or(i64::MAX);

        self.with_conn(|conn| {
            let records = match &query.parent {
                Some(parent) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {FILE_COLUMNS} FROM files WHERE parent_id IS ?1
                         ORDER BY rowid LIMIT ?2 OFFSET ?3"
                    ))?;
                    let rows = stmt.query_map(params![parent.id(), limit, skip], file_from_row)?;
                    rows.collect::<std::result::Result<Vec<_>, _>>()?
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {FILE_COLUMNS} FROM files ORDER BY rowid LIMIT ?1 OFFSET ?2"
                    ))?;
                    let rows = stmt.query_map(params![limit, skip], file_from_row)?;
                    rows.collect::<std::result::Result<Vec<_>, _>>()?
                }
            };
            Ok(records)
        })
    }

    fn count_files(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }

    fn is_alive(&self) -> bool {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
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
