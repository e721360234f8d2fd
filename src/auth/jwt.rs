//! # JWT Token Management
//!
//! HS256 token generation and validation. Issued tokens are long-lived and
//! additionally persisted (hashed) so they can be revoked; validation here
//! is the stateless half of the check.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};
use super::user::User;

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (username)
    pub sub: String,

    /// Roles granted to the user at issuance
    pub roles: Vec<String>,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing (256-bit minimum recommended)
    pub secret: String,

    /// Access token lifetime
    pub token_ttl: Duration,

    /// Issuer identifier
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string(),
            token_ttl: Duration::days(30),
            issuer: "demandcast".to_string(),
        }
    }
}

/// JWT manager for token generation and validation
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// Create a new JWT manager with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Lifetime of issued tokens, in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.config.token_ttl.num_seconds()
    }

    /// Generate an access token for a user
    pub fn generate_token(&self, user: &User) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now + self.config.token_ttl;

        let claims = JwtClaims {
            sub: user.username.clone(),
            roles: user.roles.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate an access token and extract claims
    pub fn validate_token(&self, token: &str) -> AuthResult<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::MalformedToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::PasswordPolicy;

    fn create_test_manager() -> JwtManager {
        JwtManager::new(JwtConfig {
            secret: "test_secret_key_for_testing_only".to_string(),
            token_ttl: Duration::minutes(15),
            issuer: "test".to_string(),
        })
    }

    fn create_test_user() -> User {
        User::new(
            "analyst".to_string(),
            "password123",
            None,
            vec!["viewer".to_string()],
            &PasswordPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_token_generation() {
        let manager = create_test_manager();
        let user = create_test_user();

        let token = manager.generate_token(&user).unwrap();

        assert!(!token.is_empty());
        // header.payload.signature
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_token_validation() {
        let manager = create_test_manager();
        let user = create_test_user();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.username);
        assert_eq!(claims.roles, user.roles);
        assert_eq!(claims.iss, "test");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let manager = create_test_manager();

        let result = manager.validate_token("invalid.token.here");
        assert!(matches!(
            result,
            Err(AuthError::MalformedToken) | Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager1 = JwtManager::new(JwtConfig {
            secret: "secret_one".to_string(),
            ..JwtConfig::default()
        });

        let manager2 = JwtManager::new(JwtConfig {
            secret: "secret_two".to_string(),
            ..JwtConfig::default()
        });

        let user = create_test_user();
        let token = manager1.generate_token(&user).unwrap();

        let result = manager2.validate_token(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "test_secret";
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());

        let now = Utc::now();
        let claims = JwtClaims {
            sub: "analyst".to_string(),
            roles: vec![],
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            iss: "test".to_string(),
        };

        let token = encode(&Header::default(), &claims, &encoding_key).unwrap();

        let manager = JwtManager::new(JwtConfig {
            secret: secret.to_string(),
            token_ttl: Duration::minutes(15),
            issuer: "test".to_string(),
        });

        let result = manager.validate_token(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_token_does_not_contain_password_hash() {
        let manager = create_test_manager();
        let user = create_test_user();

        let token = manager.generate_token(&user).unwrap();
        assert!(!token.contains(&user.password_hash));
    }
}
