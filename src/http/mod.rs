//! # HTTP Layer
//!
//! axum routers for the auth and forecast endpoints, the bearer-token
//! middleware, and the server bootstrap.

mod auth_routes;
mod errors;
mod forecast_routes;
mod middleware;
mod server;

pub use errors::{ApiError, ErrorResponse};
pub use server::{build_router, serve, AppState, SharedAuthService};
