use std::sync::Arc;

use super::helpers::Credentials;
use super::password::CredentialHasher;
use super::session::{SESSION_TTL, SessionStore};
use super::token::{generate_token, is_well_formed};
use crate::error::{Error, Result};
use crate::store::{Store, UserFilter};
use crate::types::{NewUser, User};

/// Registration, login/logout and token resolution.
pub struct AuthService {
    store: Arc<dyn Store>,
    sessions: SessionStore,
    hasher: CredentialHasher,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, sessions: SessionStore) -> Self {
        Self {
            store,
            sessions,
            hasher: CredentialHasher::new(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn register(&self, email: Option<&str>, password: Option<&str>) -> Result<User> {
        let email = email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::validation("Missing email"))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::validation("Missing password"))?;

        if self
            .store
            .find_user(&UserFilter::Email(email.to_string()))?
            .is_some()
        {
            return Err(Error::AlreadyExists);
        }

        let password_hash = self.hasher.hash(password)?;
        let id = self.store.insert_user(&NewUser {
            email: email.to_string(),
            password_hash: password_hash.clone(),
        })?;

        tracing::info!(user_id = %id, "registered user");

        Ok(User {
            id,
            email: email.to_string(),
            password_hash,
        })
    }

    /// Checks credentials and opens a session. Unknown email and wrong password
    /// both fail with `Unauthorized`.
    pub fn login(&self, credentials: &Credentials) -> Result<String> {
        let user = self
            .store
            .find_user(&UserFilter::Email(credentials.login.clone()))?
            .ok_or(Error::Unauthorized)?;

        if !self.hasher.verify(&credentials.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "login rejected");
            return Err(Error::Unauthorized);
        }

        let token = generate_token();
        self.sessions.put(&token, &user.id, SESSION_TTL)?;

        tracing::info!(user_id = %user.id, "session opened");
        Ok(token)
    }

    pub fn logout(&self, token: &str) -> Result<()> {
        let user_id = self.resolve(token)?;
        self.sessions.delete(token)?;

        tracing::info!(user_id = %user_id, "session closed");
        Ok(())
    }

    /// Resolves a token to the user id it was issued for.
    pub fn resolve(&self, token: &str) -> Result<String> {
        if !is_well_formed(token) {
            return Err(Error::Unauthorized);
        }
        self.sessions.get(token)?.ok_or(Error::Unauthorized)
    }

    pub fn current_user(&self, token: &str) -> Result<User> {
        let user_id = self.resolve(token)?;
        self.store
            .find_user(&UserFilter::Id(user_id))?
            .ok_or(Error::Unauthorized)
    }
}
