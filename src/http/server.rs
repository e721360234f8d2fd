//! # HTTP Server
//!
//! Application state, router assembly, and the serving loop.

use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::crypto::PasswordPolicy;
use crate::auth::jwt::JwtConfig;
use crate::auth::role::InMemoryRoleRepository;
use crate::auth::token::InMemoryTokenRepository;
use crate::auth::user::InMemoryUserRepository;
use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::executor::QueryExecutor;
use crate::metrics::MetricsAggregator;
use crate::store::Storage;

use super::auth_routes::auth_routes;
use super::forecast_routes::forecast_routes;
use super::middleware::require_bearer;

/// Auth service wiring used by the server
pub type SharedAuthService =
    AuthService<InMemoryUserRepository, InMemoryTokenRepository, InMemoryRoleRepository>;

/// Shared application state, constructed once at startup and threaded
/// through every handler.
pub struct AppState {
    pub executor: QueryExecutor,
    pub aggregator: MetricsAggregator,
    pub auth: SharedAuthService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Storage>) -> Self {
        let jwt_config = JwtConfig {
            secret: config.jwt_secret.clone(),
            token_ttl: chrono::Duration::seconds(config.token_ttl_secs),
            ..Default::default()
        };

        Self {
            executor: QueryExecutor::new(store.clone()),
            aggregator: MetricsAggregator::new(store),
            auth: AuthService::new(
                InMemoryUserRepository::new(),
                InMemoryTokenRepository::new(),
                InMemoryRoleRepository::new(),
                jwt_config,
                PasswordPolicy::default(),
            ),
            config,
        }
    }
}

async fn home_handler() -> Json<Value> {
    Json(json!({ "service": "demandcast", "status": "ok" }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the combined router with all endpoints
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        // Permissive for development when no origins are configured
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/core", forecast_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, require_bearer))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: AppConfig, store: Arc<dyn Storage>) -> Result<(), std::io::Error> {
    let addr = config.socket_addr();
    let state = Arc::new(AppState::new(config, store));
    let router = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "demandcast listening");
    axum::serve(listener, router).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_state_and_router_build() {
        let config = AppConfig {
            authentication_enabled: false,
            ..Default::default()
        };
        let state = Arc::new(AppState::new(config, Arc::new(MemoryStore::new())));
        let _router = build_router(state);
    }
}
