//! NDJSON decoding for the chat response body.
//!
//! Ollama streams one JSON object per line:
//! ```text
//! {"model":"llama3.2","message":{"role":"assistant","content":"Hello"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":" world"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":""},"done":true,"done_reason":"stop"}
//! ```
//!
//! Lines are reassembled from raw bytes across chunk boundaries, empty
//! lines are skipped, and every remaining line is parsed into one stream
//! item. The first failure (read, decode, or parse) is yielded and ends
//! the stream.
//!
//! Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-chat-completion>

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::BytesMut;
use futures::{Stream, StreamExt};
use reqwest::Response;

use crate::error::StreamError;

/// A finite stream of parsed JSON objects, one per non-empty line of the
/// chat response body, in wire-arrival order.
///
/// The stream ends when the server closes the body. Dropping it drops the
/// underlying connection.
pub struct ChatStream {
    inner: Pin<Box<dyn Stream<Item = Result<serde_json::Value, StreamError>> + Send>>,
}

impl ChatStream {
    /// Wrap an HTTP response body into a stream of parsed lines.
    pub(crate) fn new(response: Response) -> Self {
        Self {
            inner: Box::pin(decode_lines(response.bytes_stream())),
        }
    }
}

impl fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatStream").finish_non_exhaustive()
    }
}

impl Stream for ChatStream {
    type Item = Result<serde_json::Value, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.as_mut().poll_next(cx)
    }
}

/// Decode a raw byte stream into parsed JSON values, one per non-empty
/// line. Buffers partial lines across chunks; a failure is yielded once
/// and terminates the stream, dropping any remaining bytes.
fn decode_lines(
    byte_stream: impl Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static,
) -> impl Stream<Item = Result<serde_json::Value, StreamError>> + Send + 'static {
    async_stream::stream! {
        let mut byte_stream = std::pin::pin!(byte_stream);
        // Lines are assembled as raw bytes: a multi-byte character can
        // straddle a chunk boundary, so UTF-8 is only validated once a
        // whole line is in hand.
        let mut line_buf = BytesMut::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield Err(StreamError::Read(e));
                    return;
                }
            };

            // Append the chunk, then drain every complete line.
            line_buf.extend_from_slice(&chunk);

            while let Some(newline_pos) = line_buf.iter().position(|&b| b == b'\n') {
                let line = line_buf.split_to(newline_pos + 1);

                match parse_line(&line[..newline_pos]) {
                    Some(Ok(value)) => yield Ok(value),
                    Some(Err(e)) => {
                        yield Err(e);
                        return;
                    }
                    None => {}
                }
            }
        }

        // The server may close the body without a trailing newline; what is
        // left in the buffer is the final line.
        match parse_line(&line_buf) {
            Some(Ok(value)) => yield Ok(value),
            Some(Err(e)) => yield Err(e),
            None => {}
        }
    }
}

/// Parse one raw line. `None` for blank lines, otherwise the decoded
/// value or the first failure (invalid UTF-8, then bad JSON).
fn parse_line(raw: &[u8]) -> Option<Result<serde_json::Value, StreamError>> {
    let line = match std::str::from_utf8(raw) {
        Ok(s) => s.trim_end_matches('\r'),
        Err(e) => return Some(Err(StreamError::Utf8(e))),
    };

    if line.trim().is_empty() {
        return None;
    }

    Some(serde_json::from_str(line).map_err(StreamError::Parse))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
