//! Chat update and handler traits.
//!
//! The bot framework delivers two kinds of events, command messages and
//! callback presses. Both expose the same two capabilities, an originating
//! user and a reply channel, so one trait absorbs the distinction and the
//! framework adapter decides how a reply is actually delivered.

use crate::id::UserId;
use std::future::Future;
use thiserror::Error;

/// Errors from sending a reply back through a chat channel.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The platform rejected or dropped the outgoing reply.
    #[error("reply failed: {0}")]
    SendFailed(String),

    /// Catch-all for adapter-specific errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from running a command handler.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A reply could not be delivered.
    #[error(transparent)]
    Reply(#[from] ReplyError),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// One incoming chat event: a command message or a callback press.
///
/// This trait uses RPITIT and is not object-safe; the access-control
/// wrappers stay generic over the concrete update type.
pub trait ChatUpdate: Send + Sync {
    /// Identifier of the user this update came from.
    fn from_user(&self) -> UserId;

    /// Send a text reply back through the channel the update arrived on.
    fn reply(&self, text: &str) -> impl Future<Output = Result<(), ReplyError>> + Send;
}

/// A command implementation the bot dispatches updates to.
///
/// Implemented for plain async closures, so a free function can be handed
/// to the access-control wrappers directly.
pub trait Handler<U: ChatUpdate>: Send + Sync {
    /// Process one update.
    fn handle(&self, update: U) -> impl Future<Output = Result<(), HandlerError>> + Send;
}

impl<U, F, Fut> Handler<U> for F
where
    U: ChatUpdate,
    F: Fn(U) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    fn handle(&self, update: U) -> impl Future<Output = Result<(), HandlerError>> + Send {
        self(update)
    }
}
