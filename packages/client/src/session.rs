//! Connection loop of the caption client.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use serde_json::Value;
use tokio::{
    net::TcpStream,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::{
    config::ClientConfig,
    display::{format_event, is_shutdown},
    error::ClientError,
    protocol::{self, Command},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Why a connection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionEnd {
    /// The user asked to quit or closed stdin
    UserQuit,
    /// The server went away; reconnect
    Disconnected,
}

/// Run the client until the user quits or the retry policy gives up.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let (line_tx, mut line_rx) = mpsc::unbounded_channel();
    spawn_input_reader(line_tx);

    let policy = config.retry_policy();
    let mut language = config.language.clone();
    let mut attempt: u32 = 0;

    loop {
        match connect(&config.url).await {
            Ok(stream) => {
                attempt = 0;
                tracing::info!("Connected to {}", config.url);
                if run_connection(stream, &mut language, &mut line_rx).await?
                    == ConnectionEnd::UserQuit
                {
                    return Ok(());
                }
                tracing::warn!("Disconnected from {}", config.url);
            }
            Err(e) => tracing::warn!("{}", e),
        }

        attempt += 1;
        let Some(delay) = policy.delay_for(attempt) else {
            return Err(ClientError::RetriesExhausted { attempts: attempt });
        };
        tracing::info!("Reconnecting in {:?} (attempt {})", delay, attempt);
        tokio::time::sleep(delay).await;
    }
}

async fn connect(url: &str) -> Result<WsStream, ClientError> {
    let (stream, _response) = connect_async(url).await?;
    Ok(stream)
}

/// Read prompt lines on a dedicated thread; rustyline blocks.
fn spawn_input_reader(tx: UnboundedSender<String>) {
    std::thread::spawn(move || {
        if let Err(e) = read_lines(&tx) {
            tracing::error!("{}", e);
        }
    });
}

fn read_lines(tx: &UnboundedSender<String>) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if tx.send(line).is_err() {
                    return Ok(());
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}

async fn run_connection(
    stream: WsStream,
    language: &mut String,
    lines: &mut UnboundedReceiver<String>,
) -> Result<ConnectionEnd, ClientError> {
    let (mut write, mut read) = stream.split();

    // Only active sessions receive captions, so start listening right away
    let start = protocol::start_listening(Some(language.as_str()))?;
    if write.send(Message::text(start)).await.is_err() {
        return Ok(ConnectionEnd::Disconnected);
    }

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let event: Value = match serde_json::from_str(text.as_str()) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Ignoring non-JSON frame: {}", e);
                            continue;
                        }
                    };
                    if let Some(line) = format_event(&event) {
                        println!("{line}");
                    }
                    if is_shutdown(&event) {
                        return Ok(ConnectionEnd::Disconnected);
                    }
                }
                Some(Ok(Message::Close(_))) | None => return Ok(ConnectionEnd::Disconnected),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error: {}", e);
                    return Ok(ConnectionEnd::Disconnected);
                }
            },
            line = lines.recv() => {
                let command = match line {
                    Some(line) => Command::parse(&line),
                    None => Command::Quit,
                };
                if command == Command::Quit {
                    let _ = write.close().await;
                    return Ok(ConnectionEnd::UserQuit);
                }
                if let Command::Start(Some(requested)) = &command {
                    *language = requested.clone();
                }
                if let Some(frame) = protocol::encode(&command, language)? {
                    if write.send(Message::text(frame)).await.is_err() {
                        return Ok(ConnectionEnd::Disconnected);
                    }
                }
            }
        }
    }
}
