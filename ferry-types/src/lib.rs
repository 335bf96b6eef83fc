#![deny(missing_docs)]
//! Shared vocabulary for the ferry workspace.
//!
//! Defines the [`UserId`] and [`BotToken`] value types and the two traits
//! everything else composes over: [`ChatUpdate`], one incoming chat event
//! with a reply channel, and [`Handler`], a command implementation the bot
//! dispatches updates to. No bot framework appears here; a concrete
//! framework plugs in by implementing [`ChatUpdate`] for its event types.

pub mod id;
pub mod token;
pub mod update;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use id::UserId;
pub use token::BotToken;
pub use update::{ChatUpdate, Handler, HandlerError, ReplyError};
