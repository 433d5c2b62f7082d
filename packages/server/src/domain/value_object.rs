//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a session identifier
pub const SESSION_ID_MAX_LEN: usize = 64;

/// Maximum length of a language tag
pub const LANGUAGE_TAG_MAX_LEN: usize = 35;

/// Language used when a client does not declare one
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Session identifier value object.
///
/// Opaque token assigned by the server to one WebSocket connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new SessionId.
    ///
    /// # Arguments
    ///
    /// * `id` - The session identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the SessionId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::SessionIdEmpty);
        }
        let len = id.len();
        if len > SESSION_ID_MAX_LEN {
            return Err(ValueObjectError::SessionIdTooLong {
                max: SESSION_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Language tag value object (e.g. `en-US`, `fr-FR`, `ja`).
///
/// Only the shape is checked; the tag is not looked up in any registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Create a new LanguageTag.
    ///
    /// # Errors
    ///
    /// Fails when the tag is empty, longer than [`LANGUAGE_TAG_MAX_LEN`] or
    /// contains anything other than ASCII alphanumerics and `-`.
    pub fn new(tag: String) -> Result<Self, ValueObjectError> {
        if tag.is_empty() {
            return Err(ValueObjectError::LanguageTagEmpty);
        }
        let len = tag.len();
        if len > LANGUAGE_TAG_MAX_LEN {
            return Err(ValueObjectError::LanguageTagTooLong {
                max: LANGUAGE_TAG_MAX_LEN,
                actual: len,
            });
        }
        if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ValueObjectError::LanguageTagInvalidFormat(tag));
        }
        Ok(Self(tag))
    }

    /// Resolve an optional client-supplied tag. Missing or empty falls back to
    /// [`DEFAULT_LANGUAGE`].
    pub fn resolve(requested: Option<&str>) -> Result<Self, ValueObjectError> {
        match requested {
            Some(tag) if !tag.is_empty() => Self::new(tag.to_string()),
            _ => Ok(Self::default()),
        }
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current time.
    pub fn now() -> Self {
        Self(jimaku_shared::time::now_millis())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed from `self` until `later`, never negative.
    pub fn elapsed_until(&self, later: Timestamp) -> i64 {
        (later.0 - self.0).max(0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
