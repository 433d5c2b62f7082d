//! WebSocket connection handlers (Connection Gateway).

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::Session,
    infrastructure::dto::websocket::{MessageType, ServerShutdownMessage, SessionInitMessage},
    ui::state::AppState,
    usecase::{ConnectSessionUseCase, DisconnectSessionUseCase},
};

use super::{
    delivery::{SHUTDOWN_MESSAGE, encode},
    router::{MessageRouter, RouteError},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    if state.is_shutting_down() {
        tracing::warn!("Rejecting WebSocket upgrade: server is shutting down");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    ws.on_upgrade(|socket| handle_socket(socket, state))
        .into_response()
}

fn session_init_frame(session: &Session) -> Option<String> {
    encode(&SessionInitMessage {
        r#type: MessageType::SessionInit,
        session_id: session.id.as_str().to_string(),
        timestamp: session.connected_at.value(),
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Outbound channel for this session. The repository owns the only sender,
    // so removing the session closes the channel.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let connect_usecase = ConnectSessionUseCase::new(state.repository.clone());
    let session = match connect_usecase.execute(tx).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };
    let session_id = session.id.clone();
    let disconnect_usecase = DisconnectSessionUseCase::new(state.repository.clone());

    // session_init goes out before the writer task starts, so it is always first
    let init_sent = match session_init_frame(&session) {
        Some(frame) => sender.send(Message::Text(frame.into())).await.is_ok(),
        None => false,
    };
    if !init_sent {
        tracing::warn!("Failed to send session_init to '{}'", session_id);
        disconnect_usecase.execute(&session_id).await;
        return;
    }

    // Upgraded while shutdown began. If the shutdown pass already took this
    // session, its notice is queued on `rx`; otherwise close it here.
    if state.is_shutting_down() && disconnect_usecase.execute(&session_id).await {
        if let Some(frame) = encode(&ServerShutdownMessage::new(SHUTDOWN_MESSAGE)) {
            let _ = sender.send(Message::Text(frame.into())).await;
        }
        let _ = sender.send(Message::Close(None)).await;
        return;
    }

    let router = MessageRouter::new(state.repository.clone());
    let recv_session_id = session_id.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", recv_session_id, text.as_str());
                    router.handle(&recv_session_id, text.as_str()).await;
                }
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => router.handle(&recv_session_id, text).await,
                    Err(_) => router.reject(&recv_session_id, RouteError::InvalidFormat).await,
                },
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", recv_session_id);
                    break;
                }
                // Ping/pong frames are answered by the WebSocket layer
                _ => {}
            }
        }
    });

    // Spawn a task to forward this session's channel to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }
        // Channel closed: the session was removed (server shutdown)
        let _ = sender.send(Message::Close(None)).await;
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Close and transport errors both end up here
    disconnect_usecase.execute(&session_id).await;
    tracing::info!(
        "Session '{}' closed, {} session(s) remaining",
        session_id,
        disconnect_usecase.count_remaining_sessions().await
    );
}
