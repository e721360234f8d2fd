//! demandcast - backend service for retail demand-forecast review
//!
//! Exposes authentication and forecast-data endpoints over HTTP. The core is
//! a query-filtering engine that compiles structured search/filter/sort
//! criteria against a fixed schema registry and executes them, plus an
//! aggregator that scores the forecast model against the consensus baseline.

pub mod auth;
pub mod cli;
pub mod config;
pub mod executor;
pub mod http;
pub mod metrics;
pub mod query;
pub mod schema;
pub mod store;
