mod content;
mod service;

pub use content::ContentStorage;
pub use service::{FileContent, FileDraft, FileService, PAGE_SIZE, content_type_for};
