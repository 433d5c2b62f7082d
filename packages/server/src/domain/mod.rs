//! Domain layer for the caption relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::Session;
pub use error::{RepositoryError, ValueObjectError};
pub use factory::SessionIdFactory;
pub use repository::{OutboundSender, Recipient, SessionMutator, SessionRepository};
#[cfg(test)]
pub use repository::MockSessionRepository;
pub use value_object::{DEFAULT_LANGUAGE, LanguageTag, SessionId, Timestamp};
