//! # Auth Service
//!
//! Combines the user, token, and role repositories with the JWT manager:
//! registration, login, bearer authorization, verification, and logout.

use serde::Serialize;
use serde_json::Value;

use super::crypto::{hash_token, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtConfig, JwtManager};
use super::role::{RoleGrant, RoleRepository, ADMIN_ROLE};
use super::token::{IssuedToken, TokenRepository};
use super::user::{LoginRequest, RegisterRequest, User, UserRepository};

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginGrant {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub roles: Vec<String>,
    pub resources: Vec<Value>,
}

/// Result of verifying a presented token
#[derive(Debug, Clone, Serialize)]
pub struct TokenStatus {
    pub valid: bool,
    pub username: String,
    pub roles: Vec<String>,
    pub expires_in: i64,
}

/// Authenticated request context, attached by the bearer middleware
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub username: String,
    pub roles: Vec<String>,
    pub expires_in: i64,
}

/// Auth service combining all auth components
pub struct AuthService<U: UserRepository, T: TokenRepository, R: RoleRepository> {
    user_repo: U,
    token_repo: T,
    role_repo: R,
    jwt: JwtManager,
    policy: PasswordPolicy,
}

impl<U: UserRepository, T: TokenRepository, R: RoleRepository> AuthService<U, T, R> {
    pub fn new(
        user_repo: U,
        token_repo: T,
        role_repo: R,
        jwt_config: JwtConfig,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            role_repo,
            jwt: JwtManager::new(jwt_config),
            policy,
        }
    }

    /// Register a new user
    pub fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        if self.user_repo.username_exists(&request.username)? {
            return Err(AuthError::UsernameTaken);
        }

        let user = User::new(
            request.username,
            &request.password,
            request.email,
            request.roles,
            &self.policy,
        )?;
        self.user_repo.create(&user)?;
        Ok(user)
    }

    /// Authenticate a user and issue a fresh bearer token.
    ///
    /// The raw token goes to the client; only its digest is persisted.
    pub fn login(&self, request: &LoginRequest) -> AuthResult<LoginGrant> {
        let user = self
            .user_repo
            .find_by_username(&request.username)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt.generate_token(&user)?;
        let expires_in = self.jwt.token_ttl_secs();

        let issued = IssuedToken::new(
            user.username.clone(),
            user.roles.clone(),
            hash_token(&access_token),
            expires_in,
        );
        self.token_repo.create(&issued)?;

        Ok(LoginGrant {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            roles: user.roles.clone(),
            resources: self.resources_for(&user.roles)?,
        })
    }

    /// Authorize a bearer token: stateless signature/expiry check first,
    /// then the revocation check against the token store.
    pub fn authorize(&self, token: &str) -> AuthResult<AuthContext> {
        self.jwt.validate_token(token)?;

        let issued = self
            .token_repo
            .find_by_hash(&hash_token(token))?
            .ok_or(AuthError::TokenRejected)?;

        if issued.is_expired() {
            self.token_repo.delete_by_hash(&issued.token_hash)?;
            return Err(AuthError::TokenExpired);
        }

        Ok(AuthContext {
            username: issued.username,
            roles: issued.roles,
            expires_in: issued.remaining_secs(),
        })
    }

    /// Verify a presented token, reporting its remaining validity.
    /// Expired tokens are deleted on sight.
    pub fn verify(&self, token: &str) -> AuthResult<TokenStatus> {
        let issued = self
            .token_repo
            .find_by_hash(&hash_token(token))?
            .ok_or(AuthError::TokenRejected)?;

        if issued.is_expired() {
            self.token_repo.delete_by_hash(&issued.token_hash)?;
            return Err(AuthError::TokenExpired);
        }

        Ok(TokenStatus {
            valid: true,
            username: issued.username,
            roles: issued.roles,
            expires_in: issued.remaining_secs(),
        })
    }

    /// Delete a persisted token
    pub fn logout(&self, token: &str) -> AuthResult<()> {
        if !self.token_repo.delete_by_hash(&hash_token(token))? {
            return Err(AuthError::TokenNotFound);
        }
        Ok(())
    }

    /// List all registered users
    pub fn list_users(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list()
    }

    /// Insert or replace a role grant
    pub fn upsert_role(&self, name: String, resources: Value) -> AuthResult<RoleGrant> {
        let grant = RoleGrant { name, resources };
        self.role_repo.upsert(&grant)?;
        Ok(grant)
    }

    /// Grants visible to a login with the given roles; admin sees all
    pub fn grants_for(&self, roles: &[String]) -> AuthResult<Vec<RoleGrant>> {
        let grants = self.role_repo.list()?;
        if roles.iter().any(|r| r == ADMIN_ROLE) {
            return Ok(grants);
        }
        Ok(grants
            .into_iter()
            .filter(|g| roles.iter().any(|r| *r == g.name))
            .collect())
    }

    /// Resource payloads visible to a login with the given roles
    fn resources_for(&self, roles: &[String]) -> AuthResult<Vec<Value>> {
        Ok(self
            .grants_for(roles)?
            .into_iter()
            .map(|g| g.resources)
            .collect())
    }
}
