mod server;

pub use server::{CacheBackend, ServerConfig};
