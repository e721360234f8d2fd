//! # Role Grants
//!
//! Role-to-resource grants controlling which UI resources a login sees.
//! The `admin` role sees every grant.

use serde::Serialize;
use serde_json::Value;

use super::errors::{AuthError, AuthResult};

/// Role name that is granted visibility of every resource
pub const ADMIN_ROLE: &str = "admin";

/// Resources granted to one role
#[derive(Debug, Clone, Serialize)]
pub struct RoleGrant {
    pub name: String,

    /// Arbitrary JSON describing the granted resources
    pub resources: Value,
}

/// Role repository trait
pub trait RoleRepository: Send + Sync {
    /// Find a grant by role name
    fn find(&self, name: &str) -> AuthResult<Option<RoleGrant>>;

    /// Insert or replace a grant
    fn upsert(&self, grant: &RoleGrant) -> AuthResult<()>;

    /// List all grants
    fn list(&self) -> AuthResult<Vec<RoleGrant>>;
}

/// In-memory role repository
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    grants: std::sync::RwLock<Vec<RoleGrant>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleRepository for InMemoryRoleRepository {
    fn find(&self, name: &str) -> AuthResult<Option<RoleGrant>> {
        let grants = self
            .grants
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(grants.iter().find(|g| g.name == name).cloned())
    }

    fn upsert(&self, grant: &RoleGrant) -> AuthResult<()> {
        let mut grants = self
            .grants
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        match grants.iter_mut().find(|g| g.name == grant.name) {
            Some(existing) => existing.resources = grant.resources.clone(),
            None => grants.push(grant.clone()),
        }
        Ok(())
    }

    fn list(&self) -> AuthResult<Vec<RoleGrant>> {
        let grants = self
            .grants
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(grants.clone())
    }
}
