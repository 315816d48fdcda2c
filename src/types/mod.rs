mod kind;
mod models;

pub use kind::{FileKind, ParentRef};
pub use models::{FileRecord, NewFile, NewUser, User};
