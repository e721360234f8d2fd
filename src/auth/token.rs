//! # Issued Tokens
//!
//! Persistence for issued bearer tokens so they can be verified and revoked.
//! Only the SHA-256 digest of a token is kept; the raw token is returned to
//! the client once at login.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::crypto::constant_time_str_eq;
use super::errors::{AuthError, AuthResult};

/// A persisted bearer token
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub id: Uuid,

    /// Login name the token was issued to
    pub username: String,

    /// Roles captured at issuance
    pub roles: Vec<String>,

    /// SHA-256 digest of the raw token
    #[serde(skip_serializing)]
    pub token_hash: String,

    /// Lifetime in seconds from `created_at`
    pub expires_in: i64,

    pub created_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn new(username: String, roles: Vec<String>, token_hash: String, expires_in: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            roles,
            token_hash,
            expires_in,
            created_at: Utc::now(),
        }
    }

    /// Whether the token's lifetime has elapsed
    pub fn is_expired(&self) -> bool {
        self.created_at + Duration::seconds(self.expires_in) < Utc::now()
    }

    /// Seconds of validity left
    pub fn remaining_secs(&self) -> i64 {
        self.expires_in - (Utc::now() - self.created_at).num_seconds()
    }
}

/// Token repository trait
pub trait TokenRepository: Send + Sync {
    /// Find a token by the digest of its raw value
    fn find_by_hash(&self, token_hash: &str) -> AuthResult<Option<IssuedToken>>;

    /// Persist a freshly issued token
    fn create(&self, token: &IssuedToken) -> AuthResult<()>;

    /// Delete a token by digest; returns whether one existed
    fn delete_by_hash(&self, token_hash: &str) -> AuthResult<bool>;
}

/// In-memory token repository
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    tokens: std::sync::RwLock<Vec<IssuedToken>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenRepository for InMemoryTokenRepository {
    fn find_by_hash(&self, token_hash: &str) -> AuthResult<Option<IssuedToken>> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(tokens
            .iter()
            .find(|t| constant_time_str_eq(&t.token_hash, token_hash))
            .cloned())
    }

    fn create(&self, token: &IssuedToken) -> AuthResult<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        tokens.push(token.clone());
        Ok(())
    }

    fn delete_by_hash(&self, token_hash: &str) -> AuthResult<bool> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        let before = tokens.len();
        tokens.retain(|t| !constant_time_str_eq(&t.token_hash, token_hash));
        Ok(tokens.len() < before)
    }
}
