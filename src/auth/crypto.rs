//! # Cryptographic Utilities
//!
//! Password hashing and token digests. Passwords are only stored as
//! Argon2id hashes; issued tokens are only stored as SHA-256 digests.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};

/// Password requirements configuration
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_number: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: false,
            require_lowercase: false,
            require_number: false,
        }
    }
}

impl PasswordPolicy {
    /// Validate a password against this policy
    pub fn validate(&self, password: &str) -> AuthResult<()> {
        if password.len() < self.min_length {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }

        if self.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        if self.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one lowercase letter".to_string(),
            ));
        }

        if self.require_number && !password.chars().any(|c| c.is_numeric()) {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one number".to_string(),
            ));
        }

        Ok(())
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Verify a password against its hash
///
/// Uses constant-time comparison internally (via the argon2 crate).
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Digest a token for storage using SHA-256
///
/// Tokens are stored hashed; the raw token is only given to the client.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, result)
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = "secure_password_123";
        let hash = hash_password(password).unwrap();

        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_password_hash_produces_unique_hashes() {
        let password = "same_password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Different salt per hash
        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_password_policy() {
        let policy = PasswordPolicy {
            min_length: 8,
            require_uppercase: true,
            require_number: true,
            ..Default::default()
        };

        assert!(policy.validate("Ab1").is_err());
        assert!(policy.validate("abcdefgh1").is_err());
        assert!(policy.validate("Abcdefgh").is_err());
        assert!(policy.validate("Abcdefgh1").is_ok());
    }

    #[test]
    fn test_token_hashing_is_deterministic() {
        let hash = hash_token("some-token");
        assert_ne!(hash, "some-token");
        assert_eq!(hash, hash_token("some-token"));
        assert_ne!(hash, hash_token("other-token"));
    }

    #[test]
    fn test_constant_time_comparison() {
        assert!(constant_time_str_eq("hello", "hello"));
        assert!(!constant_time_str_eq("hello", "world"));
        assert!(!constant_time_str_eq("hello", "hello!"));
    }
}
