//! Bearer-token middleware
//!
//! Guards every route except the anonymous allowlist. On success the
//! authenticated context is attached to the request extensions.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::AuthError;

use super::errors::ApiError;
use super::server::AppState;

/// Final path segments reachable without a token
const ANONYMOUS_SEGMENTS: &[&str] = &["login", "register", "token", "verify"];

fn is_anonymous(path: &str) -> bool {
    if path == "/" || path == "/health" {
        return true;
    }
    path.rsplit('/')
        .next()
        .is_some_and(|segment| ANONYMOUS_SEGMENTS.contains(&segment))
}

/// Enforce bearer authentication on protected routes.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.authentication_enabled || is_anonymous(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(AuthError::TokenMissing)?;

    let context = state.auth.authorize(token)?;
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_paths() {
        assert!(is_anonymous("/"));
        assert!(is_anonymous("/health"));
        assert!(is_anonymous("/auth/login"));
        assert!(is_anonymous("/auth/register"));
        assert!(is_anonymous("/auth/token"));
        assert!(is_anonymous("/auth/verify"));
    }

    #[test]
    fn test_protected_paths() {
        assert!(!is_anonymous("/core/forecast"));
        assert!(!is_anonymous("/core/forecast/metrics"));
        assert!(!is_anonymous("/auth/users"));
        assert!(!is_anonymous("/auth/logout"));
    }
}
