mod app;
mod auth;
pub mod dto;
mod extract;
mod files;
pub mod response;
mod router;
mod users;

pub use router::{AppState, create_router};
