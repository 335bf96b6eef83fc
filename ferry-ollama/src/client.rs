//! Ollama API client struct and builder.

use ferry_config::Settings;
use serde::Deserialize;

use crate::error::ClientError;
use crate::streaming::ChatStream;

/// Default host of a local Ollama server.
const DEFAULT_HOST: &str = "localhost";

/// Default Ollama API port.
const DEFAULT_PORT: &str = "11434";

/// Client for the Ollama HTTP API.
///
/// Holds only the endpoint address. Every call opens its own short-lived
/// connection; nothing is pooled or reused across calls.
///
/// # Example
///
/// ```no_run
/// use ferry_ollama::Ollama;
///
/// let client = Ollama::new()
///     .host("localhost")
///     .port("11434");
/// ```
#[derive(Clone)]
pub struct Ollama {
    /// Server host name (override for remote instances).
    host: String,
    /// Server port, kept as a string straight from configuration.
    port: String,
}

/// Envelope of the `/api/tags` response.
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<serde_json::Value>,
}

impl Ollama {
    /// Create a new client pointed at the default local endpoint,
    /// `http://localhost:11434`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT.into(),
        }
    }

    /// Build a client from loaded [`Settings`].
    ///
    /// Host and port are taken exactly as configured; a blank host fails at
    /// request time, not here.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            host: settings.ollama_host.clone(),
            port: settings.ollama_port.clone(),
        }
    }

    /// Override the server host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the server port.
    #[must_use]
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    /// Build the model listing endpoint URL.
    pub(crate) fn tags_url(&self) -> String {
        format!("http://{}:{}/api/tags", self.host, self.port)
    }

    /// Build the chat endpoint URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("http://{}:{}/api/chat", self.host, self.port)
    }

    /// Fetch the list of installed models.
    ///
    /// Returns the `models` array of the `/api/tags` response as opaque
    /// JSON values, passed through untransformed. Any status other than 200
    /// yields an empty list, with no retry and no distinction between
    /// failure classes. Transport failures (connection refused, timeout,
    /// DNS) surface as [`ClientError::Transport`].
    pub async fn list_models(&self) -> Result<Vec<serde_json::Value>, ClientError> {
        let url = self.tags_url();
        tracing::debug!(url = %url, "requesting model list from Ollama");

        // A fresh client per call; no connection outlives the call or is
        // reused by the next one.
        let response = reqwest::Client::new().get(&url).send().await?;

        // Exactly 200. Anything else, including other 2xx, degrades to an
        // empty list.
        if response.status().as_u16() != 200 {
            return Ok(Vec::new());
        }

        let text = response.text().await?;
        let tags: TagsResponse = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("bad tags body: {e}")))?;
        Ok(tags.models)
    }

    /// Stream a chat completion.
    ///
    /// `payload` is forwarded verbatim as the JSON request body. The
    /// response body is decoded as newline-delimited JSON, one stream item
    /// per non-empty line, in arrival order. The status line is never
    /// inspected: an error response flows through the same decoder and
    /// surfaces to the consumer as parse failures.
    ///
    /// `model` and `prompt` are accepted for call-site compatibility and
    /// not read; the payload already carries the model name and message
    /// history.
    // TODO: drop the unused model/prompt arguments once every caller builds
    // them into the payload.
    pub async fn chat(
        &self,
        payload: serde_json::Value,
        _model: &str,
        _prompt: &str,
    ) -> Result<ChatStream, ClientError> {
        let url = self.chat_url();
        tracing::debug!(url = %url, "sending chat request to Ollama");

        // A fresh client here as well; the connection lives only as long
        // as the returned stream.
        let response = reqwest::Client::new()
            .post(&url)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await?;

        Ok(ChatStream::new(response))
    }
}

impl Default for Ollama {
    fn default() -> Self {
        Self::new()
    }
}
