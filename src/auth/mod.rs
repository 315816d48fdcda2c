mod helpers;
mod middleware;
mod password;
mod service;
mod session;
mod token;

pub use helpers::{Credentials, parse_basic_credentials};
pub use middleware::{AuthError, OptionalUser, RequireUser, TOKEN_HEADER};
pub use password::CredentialHasher;
pub use service::AuthService;
pub use session::{SESSION_TTL, SessionStore};
pub use token::{generate_token, is_well_formed};
