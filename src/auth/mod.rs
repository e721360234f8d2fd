//! # Authentication
//!
//! Username/password accounts with Argon2id hashes, HS256 token issuance,
//! persisted (hashed-at-rest) bearer tokens, and role-to-resource grants.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod role;
pub mod service;
pub mod token;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use service::{AuthContext, AuthService, LoginGrant, TokenStatus};
