//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Wrong username or password (generic - don't leak which)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Username already registered
    #[error("Username already exists")]
    UsernameTaken,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// A JSON form field (roles, resources) failed to parse
    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    // ==================
    // Token Errors
    // ==================
    /// Authorization header missing or not a bearer scheme
    #[error("Unauthorized access")]
    TokenMissing,

    /// Presented token is not on record
    #[error("Token not found")]
    TokenRejected,

    /// Presented token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// Token is not a well-formed JWT
    #[error("Malformed token")]
    MalformedToken,

    /// Token signature does not verify
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Logout target does not exist
    #[error("Token not found")]
    TokenNotFound,

    // ==================
    // Internal Errors
    // ==================
    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::WeakPassword(_) => 400,
            AuthError::InvalidPayload(_) => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::TokenMissing => 401,
            AuthError::TokenRejected => 401,
            AuthError::TokenExpired => 401,
            AuthError::MalformedToken => 401,
            AuthError::InvalidSignature => 401,

            // 404 Not Found
            AuthError::TokenNotFound => 404,

            // 409 Conflict
            AuthError::UsernameTaken => 409,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Whether this error is the caller's fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::UsernameTaken.status_code(), 409);
        assert_eq!(AuthError::TokenNotFound.status_code(), 404);
        assert_eq!(AuthError::HashingFailed.status_code(), 500);
    }

    #[test]
    fn test_credentials_error_does_not_leak_which_part_failed() {
        let message = AuthError::InvalidCredentials.to_string();
        assert_eq!(message, "Invalid username or password");
    }
}
