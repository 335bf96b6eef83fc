//! Typed user identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a chat-platform user.
///
/// Just an integer underneath, assigned by the bot platform. The newtype
/// keeps user ids from being mixed up with other numbers.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    /// Create a new user id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
