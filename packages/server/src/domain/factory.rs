//! Domain factories for creating domain entities and value objects.

use super::{SessionId, error::ValueObjectError};

/// Radix used to render each random component of a session id
const ID_RADIX: u64 = 36;

/// Factory for generating SessionId instances.
///
/// Ids are the concatenation of two independent random 64-bit components,
/// each rendered in base 36. They identify connections only and carry no
/// authority.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a new SessionId from two UUID v4 random components.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<SessionId, ValueObjectError> {
        let first = random_component();
        let second = random_component();
        SessionId::new(format!("{}{}", to_base36(first), to_base36(second)))
    }
}

fn random_component() -> u64 {
    let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
    high ^ low
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = (value % ID_RADIX) as u32;
        // digit < 36 so from_digit always succeeds
        digits.push(char::from_digit(digit, ID_RADIX as u32).unwrap_or('0'));
        value /= ID_RADIX;
    }
    digits.iter().rev().collect()
}
