//! Server bootstrap: routing, listener and graceful shutdown.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ServerError,
    infrastructure::repository::InMemorySessionRepository,
    ui::{
        handler::{delivery::notify_shutdown, health_check, list_sessions, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
    usecase::ShutdownUseCase,
};

/// Build the axum router for the given state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/sessions", get(list_sessions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a termination signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let state = Arc::new(AppState::new(Arc::new(InMemorySessionRepository::new())));
    serve(listener, state, shutdown_signal(), config.shutdown_grace()).await
}

/// Serve on an already bound listener.
///
/// When `shutdown` resolves, new upgrades are refused, every session is
/// removed from the store and sent `server_shutdown` (its socket closes right
/// after), `grace` elapses so writers can flush, and then the listener stops
/// accepting.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
    grace: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!("Listening on {}", local_addr);

    let shutdown_state = state.clone();
    let graceful = async move {
        shutdown.await;
        tracing::info!("Shutdown signal received, closing all sessions");
        shutdown_state.begin_shutdown();
        let recipients = ShutdownUseCase::new(shutdown_state.repository.clone())
            .execute()
            .await;
        let report = notify_shutdown(recipients);
        tracing::info!("Sent server_shutdown to {} session(s)", report.delivered);
        tokio::time::sleep(grace).await;
    };

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(graceful)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
