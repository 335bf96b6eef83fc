//! Process settings loaded from the environment.

use ferry_types::{BotToken, UserId};
use std::collections::HashSet;
use tracing::Level;

/// Default port of a local Ollama server.
const DEFAULT_OLLAMA_PORT: &str = "11434";

/// Immutable process configuration, read once at startup.
#[derive(Debug)]
pub struct Settings {
    /// Bot API credential from `TOKEN`. Empty when the variable is unset;
    /// the bot framework rejects an empty token at connect time.
    pub token: BotToken,
    /// Allow-listed user ids from `ADMIN_IDS` (comma-separated integers).
    pub admin_ids: HashSet<UserId>,
    /// Host name of the inference server, from `OLLAMA_BASE_URL`. Empty
    /// when unset; requests against an empty host fail at send time.
    pub ollama_host: String,
    /// Port of the inference server, from `OLLAMA_PORT`. Kept as a string
    /// and interpolated into request URLs unvalidated.
    pub ollama_port: String,
    /// Log verbosity from `LOG_LEVEL`.
    pub log_level: Level,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Loads a `.env` file first when one is present (existing process
    /// variables win). Never fails: each missing variable falls back to its
    /// default, and malformed values degrade instead of erroring.
    ///
    /// `LOG_LEVEL` resolves asymmetrically: an absent variable means
    /// [`Level::INFO`], while a present but unrecognized name means
    /// [`Level::DEBUG`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let token = BotToken::new(std::env::var("TOKEN").unwrap_or_default());
        let admin_ids = parse_admin_ids(&std::env::var("ADMIN_IDS").unwrap_or_default());
        let ollama_host = std::env::var("OLLAMA_BASE_URL").unwrap_or_default();
        let ollama_port =
            std::env::var("OLLAMA_PORT").unwrap_or_else(|_| DEFAULT_OLLAMA_PORT.into());
        let log_level = match std::env::var("LOG_LEVEL") {
            // An unrecognized name selects DEBUG, not the INFO used when
            // the variable is absent.
            Ok(name) => name.parse().unwrap_or(Level::DEBUG),
            Err(_) => Level::INFO,
        };

        Self {
            token,
            admin_ids,
            ollama_host,
            ollama_port,
            log_level,
        }
    }
}

/// Parse a comma-separated id list. Entries that do not parse as integers
/// are dropped.
fn parse_admin_ids(raw: &str) -> HashSet<UserId> {
    raw.split(',')
        .filter_map(|entry| entry.trim().parse::<i64>().ok())
        .map(UserId::new)
        .collect()
}
