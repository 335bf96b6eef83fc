#![deny(missing_docs)]

//! Access-control wrappers for chat command handlers.
//!
//! A wrapper takes a handler and returns a new handler with the access
//! policy applied in front of it:
//!
//! ```ignore
//! let handler = admin_only(settings.admin_ids.clone(), restart_command);
//! dispatcher.register("/restart", handler);
//! ```
//!
//! The wrappers depend only on the [`ChatUpdate`] trait, so the same
//! policy works with any chat frontend that can report a sender and
//! deliver a reply.

use std::collections::HashSet;
use std::future::Future;

use ferry_types::{ChatUpdate, Handler, HandlerError, UserId};

/// Reply sent to a sender who is not on the allow list.
pub const ACCESS_DENIED_REPLY: &str =
    "Access Denied: This command is reserved for administrators.";

/// Restrict `handler` to senders whose id is in `admins`.
///
/// Anyone else gets [`ACCESS_DENIED_REPLY`] and the wrapped handler is
/// never invoked. A denied call is a normal `Ok` outcome; only a failed
/// denial reply surfaces as an error.
#[must_use]
pub fn admin_only<H>(admins: HashSet<UserId>, handler: H) -> AdminOnly<H> {
    AdminOnly { admins, inner: handler }
}

/// Wrap `handler` without any access check.
///
/// Exists so every registered command goes through the same wrapping
/// step and the policy choice is visible at the registration site.
#[must_use]
pub fn open_access<H>(handler: H) -> OpenAccess<H> {
    OpenAccess { inner: handler }
}

/// Handler wrapper produced by [`admin_only`].
#[derive(Debug, Clone)]
pub struct AdminOnly<H> {
    admins: HashSet<UserId>,
    inner: H,
}

impl<U, H> Handler<U> for AdminOnly<H>
where
    U: ChatUpdate,
    H: Handler<U>,
{
    fn handle(&self, update: U) -> impl Future<Output = Result<(), HandlerError>> + Send {
        async move {
            let user = update.from_user();
            if self.admins.contains(&user) {
                return self.inner.handle(update).await;
            }

            // Reply first, then log; a failed reply propagates and skips
            // the log line.
            update.reply(ACCESS_DENIED_REPLY).await?;
            tracing::info!(user = %user, "unauthorized access attempt");
            Ok(())
        }
    }
}

/// Handler wrapper produced by [`open_access`].
#[derive(Debug, Clone)]
pub struct OpenAccess<H> {
    inner: H,
}

impl<U, H> Handler<U> for OpenAccess<H>
where
    U: ChatUpdate,
    H: Handler<U>,
{
    fn handle(&self, update: U) -> impl Future<Output = Result<(), HandlerError>> + Send {
        self.inner.handle(update)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use ferry_types::test_utils::ScriptedUpdate;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;

    use super::*;

    fn admins(ids: &[i64]) -> HashSet<UserId> {
        ids.iter().copied().map(UserId::new).collect()
    }

    /// A handler that counts how many times it ran.
    fn counting_handler() -> (Arc<AtomicUsize>, impl Handler<ScriptedUpdate>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler = move |_update: ScriptedUpdate| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), HandlerError>(())
            }
        };
        (calls, handler)
    }

    /// One captured event: its level, message, and rendered field values.
    #[derive(Clone)]
    struct LoggedEvent {
        level: Level,
        message: String,
        fields: Vec<(String, String)>,
    }

    /// A tracing layer that records every event it sees.
    #[derive(Clone, Default)]
    struct RecordingLayer {
        events: Arc<Mutex<Vec<LoggedEvent>>>,
    }

    impl RecordingLayer {
        fn events(&self) -> Vec<LoggedEvent> {
            self.events.lock().expect("event log lock").clone()
        }
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = RecordingVisitor::default();
            event.record(&mut visitor);

            self.events
                .lock()
                .expect("event log lock")
                .push(LoggedEvent {
                    level: *event.metadata().level(),
                    message: visitor.message.unwrap_or_default(),
                    fields: visitor.fields,
                });
        }
    }

    #[derive(Default)]
    struct RecordingVisitor {
        message: Option<String>,
        fields: Vec<(String, String)>,
    }

    impl Visit for RecordingVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            let rendered = format!("{value:?}");
            if field.name() == "message" {
                self.message = Some(rendered);
            } else {
                self.fields.push((field.name().to_string(), rendered));
            }
        }
    }

    /// The default subscriber is thread-local; a single-thread runtime
    /// keeps every event on this thread.
    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("test runtime")
    }

    #[test]
    fn denial_text_is_fixed() {
        assert_eq!(
            ACCESS_DENIED_REPLY,
            "Access Denied: This command is reserved for administrators."
        );
    }

    #[tokio::test]
    async fn admin_runs_the_wrapped_handler() {
        let (calls, handler) = counting_handler();
        let gated = admin_only(admins(&[7, 8]), handler);

        let update = ScriptedUpdate::new(UserId::new(7));
        gated.handle(update.clone()).await.expect("should succeed");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(update.replies().is_empty(), "no denial reply for an admin");
    }

    #[tokio::test]
    async fn denial_sends_the_fixed_reply() {
        let (_, handler) = counting_handler();
        let gated = admin_only(admins(&[7]), handler);

        let update = ScriptedUpdate::new(UserId::new(9));
        gated.handle(update.clone()).await.expect("denial is Ok");

        assert_eq!(update.replies(), vec![ACCESS_DENIED_REPLY.to_string()]);
    }

    #[tokio::test]
    async fn denial_skips_the_handler() {
        let (calls, handler) = counting_handler();
        let gated = admin_only(admins(&[7]), handler);

        let update = ScriptedUpdate::new(UserId::new(9));
        gated.handle(update).await.expect("denial is Ok");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denial_is_a_normal_outcome() {
        let (_, handler) = counting_handler();
        let gated = admin_only(admins(&[7]), handler);

        let result = gated.handle(ScriptedUpdate::new(UserId::new(9))).await;

        assert!(result.is_ok(), "expected Ok, got: {:?}", result.err());
    }

    #[tokio::test]
    async fn failed_denial_reply_surfaces_as_an_error() {
        let (calls, handler) = counting_handler();
        let gated = admin_only(admins(&[7]), handler);

        let update = ScriptedUpdate::failing(UserId::new(9));
        let err = gated.handle(update).await.expect_err("reply failed");

        assert!(matches!(err, HandlerError::Reply(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_allow_list_denies_everyone() {
        let (calls, handler) = counting_handler();
        let gated = admin_only(HashSet::new(), handler);

        let update = ScriptedUpdate::new(UserId::new(1));
        gated.handle(update.clone()).await.expect("denial is Ok");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(update.replies(), vec![ACCESS_DENIED_REPLY.to_string()]);
    }

    #[tokio::test]
    async fn open_access_runs_for_any_user() {
        let (calls, handler) = counting_handler();
        let open = open_access(handler);

        open.handle(ScriptedUpdate::new(UserId::new(1)))
            .await
            .expect("should succeed");
        open.handle(ScriptedUpdate::new(UserId::new(-42)))
            .await
            .expect("should succeed");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn open_access_sends_no_replies_of_its_own() {
        let (_, handler) = counting_handler();
        let open = open_access(handler);

        let update = ScriptedUpdate::new(UserId::new(5));
        open.handle(update.clone()).await.expect("should succeed");

        assert!(update.replies().is_empty());
    }

    #[tokio::test]
    async fn handler_errors_pass_through_the_gate() {
        let failing = |_update: ScriptedUpdate| async move {
            Err::<(), HandlerError>(HandlerError::Other("command blew up".into()))
        };
        let gated = admin_only(admins(&[7]), failing);

        let err = gated
            .handle(ScriptedUpdate::new(UserId::new(7)))
            .await
            .expect_err("inner error propagates");

        assert!(matches!(err, HandlerError::Other(_)));
    }

    #[test]
    fn denial_logs_one_info_event_with_the_user_id() {
        let log = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());

        let (_, handler) = counting_handler();
        let gated = admin_only(admins(&[7]), handler);
        let update = ScriptedUpdate::new(UserId::new(9));

        tracing::subscriber::with_default(subscriber, || {
            runtime().block_on(async {
                gated.handle(update).await.expect("denial is Ok");
            });
        });

        let events = log.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::INFO);
        assert_eq!(events[0].message, "unauthorized access attempt");
        assert!(
            events[0]
                .fields
                .iter()
                .any(|(name, value)| name == "user" && value == "9"),
            "the denied id is on the event: {:?}",
            events[0].fields
        );
    }

    #[test]
    fn admitted_update_logs_nothing() {
        let log = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());

        let (calls, handler) = counting_handler();
        let gated = admin_only(admins(&[7]), handler);

        tracing::subscriber::with_default(subscriber, || {
            runtime().block_on(async {
                gated
                    .handle(ScriptedUpdate::new(UserId::new(7)))
                    .await
                    .expect("should succeed");
            });
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(log.events().is_empty(), "an admitted update is not logged");
    }

    #[test]
    fn failed_denial_reply_logs_nothing() {
        let log = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());

        let (_, handler) = counting_handler();
        let gated = admin_only(admins(&[7]), handler);

        tracing::subscriber::with_default(subscriber, || {
            runtime().block_on(async {
                gated
                    .handle(ScriptedUpdate::failing(UserId::new(9)))
                    .await
                    .expect_err("reply failed");
            });
        });

        assert!(
            log.events().is_empty(),
            "the log line follows a delivered reply"
        );
    }
}
