//! Shared fixtures for integration tests.
//!
//! Each test boots its own server on an ephemeral port with an isolated
//! in-memory repository.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use jimaku_server::{
    error::ServerError, infrastructure::repository::InMemorySessionRepository, serve,
    ui::state::AppState,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const TIMEOUT: Duration = Duration::from_secs(5);

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// A relay server running in the test's runtime
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_grace(Duration::from_millis(50)).await
    }

    /// Start a server that waits `grace` between notifying sessions and
    /// closing the listener
    pub async fn start_with_grace(grace: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let state = Arc::new(AppState::new(Arc::new(InMemorySessionRepository::new())));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(
            listener,
            state,
            async {
                let _ = shutdown_rx.await;
            },
            grace,
        ));

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Trigger graceful shutdown without waiting for the server to stop
    pub fn trigger_shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    /// Trigger graceful shutdown and wait for the server task to finish
    pub async fn shutdown(mut self) {
        self.trigger_shutdown();
        timeout(TIMEOUT, &mut self.handle)
            .await
            .expect("Server did not stop in time")
            .expect("Server task panicked")
            .expect("Server returned an error");
    }

    /// Poll `/api/health` until `activeSessions` equals `expected`
    pub async fn wait_for_session_count(&self, expected: u64) {
        let client = reqwest::Client::new();
        let url = format!("{}/api/health", self.base_url());
        let poll = async {
            loop {
                let body: Value = client
                    .get(&url)
                    .send()
                    .await
                    .expect("Failed to send request")
                    .json()
                    .await
                    .expect("Failed to parse JSON");
                if body["activeSessions"].as_u64() == Some(expected) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        };
        timeout(TIMEOUT, poll)
            .await
            .expect("Session count did not converge");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A WebSocket client that has already received its `session_init`
pub struct TestClient {
    pub session_id: String,
    stream: WsStream,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _response) = timeout(TIMEOUT, connect_async(server.ws_url()))
            .await
            .expect("Connect timed out")
            .expect("Failed to connect");
        let mut client = Self {
            session_id: String::new(),
            stream,
        };

        let init = client.recv_json().await;
        assert_eq!(init["type"], "session_init");
        client.session_id = init["sessionId"]
            .as_str()
            .expect("sessionId must be a string")
            .to_string();
        client
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_text(&value.to_string()).await;
    }

    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_binary(&mut self, bytes: Vec<u8>) {
        self.stream
            .send(Message::binary(bytes))
            .await
            .expect("Failed to send frame");
    }

    /// Next text frame as JSON, skipping control frames
    pub async fn recv_json(&mut self) -> Value {
        loop {
            let msg = timeout(TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Stream ended")
                .expect("WebSocket error");
            match msg {
                Message::Text(text) => {
                    return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                other => panic!("Unexpected frame: {other:?}"),
            }
        }
    }

    /// Start listening and consume the `listening_started` reply
    pub async fn start_listening(&mut self, language: Option<&str>) -> Value {
        let mut request = serde_json::json!({"type": "start_listening"});
        if let Some(language) = language {
            request["language"] = Value::from(language);
        }
        self.send_json(request).await;
        let reply = self.recv_json().await;
        assert_eq!(reply["type"], "listening_started");
        reply
    }

    /// Assert that no text frame arrives within `wait`
    pub async fn expect_silence(&mut self, wait: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) = timeout(wait, self.stream.next()).await {
            panic!("Expected no frame, got {}", text.as_str());
        }
    }

    /// True when the server closes the connection within the timeout
    pub async fn wait_for_close(&mut self) -> bool {
        let closed = async {
            while let Some(msg) = self.stream.next().await {
                match msg {
                    Ok(Message::Close(_)) | Err(_) => return true,
                    Ok(_) => continue,
                }
            }
            true
        };
        timeout(TIMEOUT, closed).await.unwrap_or(false)
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
