//! # User Management
//!
//! User model and repository for authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password, PasswordPolicy};
use super::errors::{AuthError, AuthResult};

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Login name (unique)
    pub username: String,

    /// Optional contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Role names granted to this user
    pub roles: Vec<String>,

    /// Argon2id password hash (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a hashed password
    pub fn new(
        username: String,
        password: &str,
        email: Option<String>,
        roles: Vec<String>,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        policy.validate(password)?;
        let password_hash = hash_password(password)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            email,
            roles,
            password_hash,
            created_at: Utc::now(),
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// User repository trait
///
/// Abstracts storage operations for users.
pub trait UserRepository: Send + Sync {
    /// Find a user by their login name
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Check if a username is already registered
    fn username_exists(&self, username: &str) -> AuthResult<bool>;

    /// Create a new user
    fn create(&self, user: &User) -> AuthResult<()>;

    /// List all users
    fn list(&self) -> AuthResult<Vec<User>>;
}

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: std::sync::RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    fn username_exists(&self, username: &str) -> AuthResult<bool> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().any(|u| u.username == username))
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }

        users.push(user.clone());
        Ok(())
    }

    fn list(&self) -> AuthResult<Vec<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.clone())
    }
}
