//! In-memory wrapper for the bot credential.

use zeroize::Zeroizing;

/// The bot API token. Cannot be logged, serialized, or cloned.
/// Memory is zeroed on drop via [`Zeroizing`].
///
/// The only way to read the value is [`BotToken::with_str`], which enforces
/// scoped exposure: the token is only visible inside the closure.
pub struct BotToken {
    inner: Zeroizing<String>,
}

impl BotToken {
    /// Wrap a token. The input string is moved, not copied.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(token.into()),
        }
    }

    /// Scoped exposure. The token is only accessible inside the closure.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.inner)
    }

    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the token is empty. An empty token means the credential was
    /// never configured; the bot framework rejects it at connect time.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for BotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

// Intentionally: no Display, no Clone, no Serialize, no PartialEq.
