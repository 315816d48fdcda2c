//! # Files Manager
//!
//! A small file hosting backend: users register and log in for a session token,
//! upload files and folders, and choose per file whether it is private to them or
//! public. Usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! files-manager = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use files_manager::cache::MemoryCache;
//! use files_manager::files::ContentStorage;
//! use files_manager::server::{AppState, create_router};
//! use files_manager::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/files_manager.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(
//!     Arc::new(store),
//!     Arc::new(MemoryCache::new()),
//!     ContentStorage::new("/tmp/files_manager"),
//! ));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `files-manager` binary. Disable with `default-features = false`.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod files;
pub mod server;
pub mod store;
pub mod types;
