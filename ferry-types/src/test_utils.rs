//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag.

use crate::id::UserId;
use crate::update::{ChatUpdate, ReplyError};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// A [`ChatUpdate`] double that records every reply sent through it.
///
/// Clones share the reply log, so a test can keep one clone for inspection
/// and hand the other to the code under test.
#[derive(Clone)]
pub struct ScriptedUpdate {
    user: UserId,
    replies: Arc<Mutex<Vec<String>>>,
    fail_replies: bool,
}

impl ScriptedUpdate {
    /// An update from the given user whose replies succeed.
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            replies: Arc::new(Mutex::new(Vec::new())),
            fail_replies: false,
        }
    }

    /// An update whose reply channel always fails.
    pub fn failing(user: UserId) -> Self {
        Self {
            fail_replies: true,
            ..Self::new(user)
        }
    }

    /// Replies recorded so far, in send order.
    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().expect("reply log poisoned").clone()
    }
}

impl ChatUpdate for ScriptedUpdate {
    fn from_user(&self) -> UserId {
        self.user
    }

    fn reply(&self, text: &str) -> impl Future<Output = Result<(), ReplyError>> + Send {
        let result = if self.fail_replies {
            Err(ReplyError::SendFailed("scripted failure".into()))
        } else {
            self.replies
                .lock()
                .expect("reply log poisoned")
                .push(text.to_string());
            Ok(())
        };
        async move { result }
    }
}
