pub const SCHEMA: &str = r#"
-- Users authenticate with email + password; the hash is an argon2id PHC string
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

-- File records: folders, files and images. Content bytes live on disk.
CREATE TABLE IF NOT EXISTS files (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id),
    name TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('folder', 'file', 'image')),
    is_public INTEGER NOT NULL DEFAULT 0,

    -- NULL = root; otherwise the id of a folder record
    parent_id TEXT,

    -- NULL for folders
    local_path TEXT
);

CREATE INDEX IF NOT EXISTS idx_files_parent ON files(parent_id);
CREATE INDEX IF NOT EXISTS idx_files_user ON files(user_id);
"#;
