//! # extensus-api
//!
//! HTTP layer for Extensus built on Axum.
//!
//! Provides the page routes, the access gate middleware, the identity
//! extractor, error mapping, and server bootstrap.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
