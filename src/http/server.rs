//! HTTP transport bootstrap.
//!
//! Mounts the chat endpoints on an axum router and serves them until the
//! cancellation token fires.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::handlers::{change_shift, chat_status, health, poll_chat, start_chat, HttpState};
use crate::config::GlobalConfig;
use crate::engine::QueueEngine;
use crate::{AppError, Result};

/// Build the router over `state`.
#[must_use]
pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat/start", post(start_chat))
        .route("/api/chat/poll/{id}", post(poll_chat))
        .route("/api/chat/status/{id}", get(chat_status))
        .route("/api/chat/shift/{shift}", post(change_shift))
        .with_state(state)
}

/// Bind `config.http_addr()` and serve until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Http` if the listener cannot bind or the server fails.
pub async fn serve_http(
    engine: Arc<QueueEngine>,
    config: &GlobalConfig,
    ct: CancellationToken,
) -> Result<()> {
    let bind = config.http_addr();
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Http(format!("failed to bind {bind}: {err}")))?;

    let state = HttpState {
        engine,
        office_hours: config.office_hours,
    };
    serve_on(listener, state, ct).await
}

/// Serve on an already-bound listener until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Http` if the server fails.
pub async fn serve_on(listener: TcpListener, state: HttpState, ct: CancellationToken) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "starting HTTP transport");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Http(format!("server error: {err}")))?;

    info!("HTTP transport shut down");
    Ok(())
}
