//! Application builder: wires router, middleware, and state into an Axum
//! app, and runs it.

use axum::Router;
use tower_http::trace::TraceLayer;

use extensus_core::config::AppConfig;
use extensus_core::error::AppError;
use extensus_database::connect_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

/// Runs the Extensus server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Extensus server...");

    // ── Step 1: Account store ────────────────────────────────────
    let accounts = connect_store(&config.database).await?;

    // ── Step 2: Auth services ────────────────────────────────────
    let addr = config.server.bind_address();
    let seed = config.auth.seed_account.clone();
    let state = AppState::new(config, accounts)?;

    // ── Step 3: Seed account ─────────────────────────────────────
    if let Some(seed) = seed
        && let Some(account) = state.registrar.seed(&seed).await?
    {
        tracing::info!(account_id = %account.id, "Created seed account");
    }

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Extensus server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Extensus server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
