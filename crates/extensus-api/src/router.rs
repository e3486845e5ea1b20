//! Route definitions for the Extensus HTTP service.
//!
//! Public-only pages sit behind `require_absent`, account pages behind
//! `require_present`. The health probe is ungated.

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes(state.clone()))
        .merge(account_routes(state.clone()))
        .merge(health_routes())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Sign-in and password recovery, only for anonymous visitors
fn public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::auth::sign_in_page).post(handlers::auth::sign_in),
        )
        .route(
            "/forgot",
            get(handlers::auth::forgot_page).post(handlers::auth::forgot),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_absent,
        ))
}

/// Pages for signed-in accounts
fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .route("/logout", get(handlers::auth::sign_out))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_present,
        ))
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
