//! Outbound frame encoding and fan-out.

use serde::Serialize;

use crate::{domain::Recipient, infrastructure::dto::websocket::ServerShutdownMessage};

/// `message` of the `server_shutdown` frame
pub const SHUTDOWN_MESSAGE: &str = "Server is shutting down";

/// Delivery counts of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Serialize an outbound message, logging instead of failing
pub fn encode<T: Serialize>(message: &T) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::error!("Failed to serialize frame: {}", e);
            None
        }
    }
}

/// Queue `frame` on every recipient's channel.
///
/// A closed channel is logged and skipped; the rest still receive the frame.
pub fn deliver(recipients: &[Recipient], frame: &str) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for recipient in recipients {
        if recipient.sender.send(frame.to_string()).is_err() {
            tracing::warn!("Failed to send frame to session '{}'", recipient.id);
            report.failed += 1;
        } else {
            report.delivered += 1;
        }
    }
    report
}

/// Send `server_shutdown` to sessions already removed from the store.
///
/// Consumes the recipients, so every channel closes once the frame is queued.
pub fn notify_shutdown(recipients: Vec<Recipient>) -> DeliveryReport {
    let Some(frame) = encode(&ServerShutdownMessage::new(SHUTDOWN_MESSAGE)) else {
        return DeliveryReport {
            delivered: 0,
            failed: recipients.len(),
        };
    };
    deliver(&recipients, &frame)
}
