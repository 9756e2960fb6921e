//! HTTP server initialization and runtime setup.
//!
//! Builds the shared state, binds the listener (plain TCP or TLS) and runs
//! the Axum service until Ctrl+C / SIGTERM.

use crate::config::Config;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use std::time::Duration;

/// How long in-flight requests may take to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Token store and submission gate
/// - Axum router with tracing, CORS and path normalization
/// - TLS listener if both `TLS_CERT` and `TLS_KEY` are set, plain TCP otherwise
///
/// # Errors
///
/// Returns an error if:
/// - The captcha HTTP client cannot be built
/// - Certificate or key files cannot be loaded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = AppState::from_config(&config).context("Failed to build application state")?;
    tracing::info!(
        capacity = state.store.capacity(),
        policy = ?state.store.policy(),
        captcha = state.gate.captcha_enabled(),
        "Token store ready"
    );

    let app = app_router(state, &config.cors_origins);
    let addr = config.listen_addr()?;

    match config.tls() {
        Some(tls) => {
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                tracing::debug!("rustls crypto provider already installed");
            }

            let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
                .await
                .with_context(|| {
                    format!(
                        "Failed to load TLS certificate {} / key {}",
                        tls.cert_path.display(),
                        tls.key_path.display()
                    )
                })?;

            let handle = Handle::new();
            tokio::spawn(graceful_shutdown(handle.clone()));

            tracing::info!("Listening on https://{addr}");

            axum_server::bind_rustls(addr, rustls_config)
                .handle(handle)
                .serve(ServiceExt::<Request>::into_make_service(app))
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("Listening on http://{addr}");

            axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn graceful_shutdown(handle: Handle) {
    shutdown_signal().await;
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
