#![deny(missing_docs)]
//! HTTP client for a locally hosted Ollama server.
//!
//! Two operations: [`Ollama::list_models`] wraps `GET /api/tags`, and
//! [`Ollama::chat`] wraps `POST /api/chat`, exposing the NDJSON response
//! body as a [`ChatStream`] of parsed JSON values. Ollama runs locally, so
//! there are no auth headers and all traffic is plain HTTP to a host and
//! port taken from configuration.

mod client;
mod error;
mod streaming;

pub use client::Ollama;
pub use error::{ClientError, StreamError};
pub use streaming::ChatStream;
