//! Auth HTTP Routes
//!
//! Form-encoded endpoints for registration, login (including the OAuth2
//! password-flow alias at /token), token verification, logout, and the user
//! and role administration surface.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::role::{RoleGrant, ADMIN_ROLE};
use crate::auth::user::{LoginRequest, RegisterRequest, User};
use crate::auth::{AuthContext, AuthError, LoginGrant, TokenStatus};

use super::errors::ApiError;
use super::server::AppState;

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/token", post(login_handler))
        .route("/verify", post(verify_handler))
        .route("/logout", post(logout_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/roles", get(list_roles_handler).post(upsert_role_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RegisterForm {
    username: String,
    password: String,
    email: Option<String>,
    /// JSON array of role names, e.g. `["viewer"]`
    roles: Option<String>,
}

impl RegisterForm {
    fn into_request(self) -> Result<RegisterRequest, AuthError> {
        let roles = match self.roles.as_deref() {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw)
                .map_err(|e| AuthError::InvalidPayload(format!("roles: {}", e)))?,
            _ => Vec::new(),
        };
        Ok(RegisterRequest {
            username: self.username,
            password: self.password,
            email: self.email,
            roles,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct TokenForm {
    token: String,
}

#[derive(Debug, Deserialize)]
struct RoleForm {
    name: String,
    /// JSON payload describing the granted resources
    resources: String,
}

async fn register_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.auth.register(form.into_request()?)?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("User registered successfully"),
    ))
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginGrant>, ApiError> {
    let grant = state.auth.login(&LoginRequest {
        username: form.username,
        password: form.password,
    })?;
    Ok(Json(grant))
}

async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenStatus>, ApiError> {
    Ok(Json(state.auth.verify(&form.token)?))
}

async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TokenForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth.logout(&form.token)?;
    Ok(MessageResponse::new("Logged out successfully"))
}

async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.auth.list_users()?))
}

async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.auth.register(form.into_request()?)?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("User created successfully"),
    ))
}

/// Grants visible to the caller. Without an authenticated context (auth
/// disabled) the full set is returned.
async fn list_roles_handler(
    State(state): State<Arc<AppState>>,
    context: Option<Extension<AuthContext>>,
) -> Result<Json<Vec<RoleGrant>>, ApiError> {
    let roles = match &context {
        Some(Extension(ctx)) => ctx.roles.clone(),
        None => vec![ADMIN_ROLE.to_string()],
    };
    Ok(Json(state.auth.grants_for(&roles)?))
}

async fn upsert_role_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RoleForm>,
) -> Result<Json<RoleGrant>, ApiError> {
    let resources = serde_json::from_str(&form.resources)
        .map_err(|e| AuthError::InvalidPayload(format!("resources: {}", e)))?;
    Ok(Json(state.auth.upsert_role(form.name, resources)?))
}
