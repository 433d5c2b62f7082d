//! Prompt commands and the frames they produce.

use jimaku_server::infrastructure::dto::websocket::MessageType;
use jimaku_shared::time::now_millis;
use serde::Serialize;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, sent as a final caption
    Caption(String),
    /// `/start [language]`
    Start(Option<String>),
    /// `/stop`
    Stop,
    /// `/ping`
    Ping,
    /// `/quit`
    Quit,
    /// Blank line
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("/start") => Self::Start(parts.next().map(str::to_string)),
            Some("/stop") => Self::Stop,
            Some("/ping") => Self::Ping,
            Some("/quit") | Some("/exit") => Self::Quit,
            _ => Self::Caption(line.to_string()),
        }
    }
}

#[derive(Serialize)]
struct StartListeningRequest<'a> {
    r#type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

#[derive(Serialize)]
struct StopListeningRequest {
    r#type: MessageType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubtitleUpdateRequest<'a> {
    r#type: MessageType,
    text: &'a str,
    is_final: bool,
    language: &'a str,
    timestamp: i64,
}

#[derive(Serialize)]
struct PingRequest {
    r#type: MessageType,
    timestamp: i64,
}

/// `start_listening` frame
pub fn start_listening(language: Option<&str>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StartListeningRequest {
        r#type: MessageType::StartListening,
        language,
    })
}

/// Encode a command as a frame. `Quit` and `Empty` produce nothing.
pub fn encode(command: &Command, language: &str) -> Result<Option<String>, serde_json::Error> {
    let frame = match command {
        Command::Caption(text) => serde_json::to_string(&SubtitleUpdateRequest {
            r#type: MessageType::SubtitleUpdate,
            text,
            is_final: true,
            language,
            timestamp: now_millis(),
        })?,
        Command::Start(requested) => start_listening(requested.as_deref().or(Some(language)))?,
        Command::Stop => serde_json::to_string(&StopListeningRequest {
            r#type: MessageType::StopListening,
        })?,
        Command::Ping => serde_json::to_string(&PingRequest {
            r#type: MessageType::Ping,
            timestamp: now_millis(),
        })?,
        Command::Quit | Command::Empty => return Ok(None),
    };
    Ok(Some(frame))
}
