//! # The dispatch engine.
//!
//! [`Engine`] owns the subscription list, the fallback consumer and the
//! record arena, all guarded by one lock. Publishing and subscribing are
//! mutually exclusive critical sections: no publish runs concurrently with
//! another publish or with a subscribe, so a subscriber never observes a
//! partially-updated subscription list and callbacks never overlap.
//!
//! ## Publish path
//! ```text
//! publish(descriptor, args)
//!   ├─► lock engine
//!   ├─► build record (code, timestamp, unique id, cells)
//!   ├─► arena.allocate(record)        ── ArenaExhausted ──► Err, nothing delivered
//!   ├─► for each subscription, in insertion order:
//!   │       matcher.matches(code)?
//!   │         ├─ yes ─► subscriber.process(&record)
//!   │         │           ├─ Err(e)           ─► abort delivery, Err
//!   │         │           └─ Ok(Drop) + droppable ─► stop propagation
//!   │         └─ no  ─► next
//!   ├─► no subscription matched ─► fallback consumer, if set
//!   ├─► arena.release(record)
//!   └─► unlock
//! ```
//!
//! ## Rules
//! - Subscriber callbacks run on the publishing thread, lock held; a slow
//!   subscriber blocks every other thread using the engine.
//! - Attempt-once: no retry anywhere on the publish path.
//! - Subscriptions cannot be removed; they live as long as the engine.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::arena::RecordArena;
use crate::core::config::EngineConfig;
use crate::diagnostics::{ArgumentPack, Descriptor, Diagnostic};
use crate::error::PublishError;
use crate::filters::{compile_pattern, Matcher};
use crate::subscribers::{Action, Subscriber};

/// One registered filter: a compiled matcher bound to its subscriber.
struct Subscription {
    matcher: Box<dyn Matcher>,
    subscriber: Arc<dyn Subscriber>,
}

/// State behind the engine lock.
struct Inner {
    subscriptions: Vec<Subscription>,
    fallback: Option<Arc<dyn Subscriber>>,
    arena: RecordArena,
}

/// The diagnostic bus: publish, subscribe, dispatch.
///
/// The engine is the allocator for the records it publishes: each record is
/// placed in the engine-owned arena, dispatched by reference, and released
/// before `publish` returns. Subscribers therefore cannot retain a record
/// past their [`process`](Subscriber::process) call - the borrow ends with
/// the dispatch.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use diagvisor::{Action, Descriptor, Diagnostic, Engine, EngineConfig, Subscriber, SubscriberError};
///
/// static OUT_OF_RANGE: Descriptor<(f32, f32)> =
///     Descriptor::new("OUT_OF_RANGE", "Measured value outside limits");
///
/// struct Printer;
///
/// impl Subscriber for Printer {
///     fn process(&self, diagnostic: &Diagnostic) -> Result<Action, SubscriberError> {
///         println!("{}", diagnostic.code());
///         Ok(Action::Continue)
///     }
///     fn name(&self) -> &'static str { "printer" }
/// }
///
/// let engine = Engine::new(EngineConfig::default());
/// engine.subscribe("OUT_*", Arc::new(Printer));
/// engine.publish(&OUT_OF_RANGE, (10.5f32, 21.6f32))?;
/// # Ok::<(), diagvisor::PublishError>(())
/// ```
pub struct Engine {
    inner: Mutex<Inner>,
}

impl Engine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                subscriptions: Vec::new(),
                fallback: None,
                arena: RecordArena::new(config.budget_limit()),
            }),
        }
    }

    /// Registers `subscriber` under the filter `pattern`.
    ///
    /// The pattern is compiled once; the subscription is appended in
    /// insertion order and lives for the engine's lifetime. Matching
    /// diagnostics are delivered in this registration order.
    pub fn subscribe(&self, pattern: &str, subscriber: Arc<dyn Subscriber>) {
        let mut inner = self.inner.lock();
        inner.subscriptions.push(Subscription {
            matcher: compile_pattern(pattern),
            subscriber,
        });
    }

    /// Sets the fallback consumer.
    ///
    /// The fallback receives every diagnostic matched by no subscription.
    /// Replaces any previously set fallback.
    pub fn set_fallback(&self, subscriber: Arc<dyn Subscriber>) {
        self.inner.lock().fallback = Some(subscriber);
    }

    /// Publishes a droppable diagnostic.
    ///
    /// Builds the record, dispatches it synchronously to every matching
    /// subscriber in subscription order, and releases it before returning.
    /// Fails with [`PublishError::ArenaExhausted`] when the record does not
    /// fit the arena budget (nothing is delivered) and with
    /// [`PublishError::Subscriber`] when a subscriber fails (delivery to
    /// the remaining subscribers is aborted).
    pub fn publish<A: ArgumentPack>(
        &self,
        descriptor: &Descriptor<A>,
        arguments: A,
    ) -> Result<(), PublishError> {
        self.publish_record(Diagnostic::new(descriptor, arguments))
    }

    /// Publishes a non-droppable diagnostic.
    ///
    /// Identical to [`publish`](Engine::publish) except the record's
    /// droppable flag is cleared: a subscriber returning
    /// [`Action::Drop`] does not stop propagation.
    pub fn publish_non_droppable<A: ArgumentPack>(
        &self,
        descriptor: &Descriptor<A>,
        arguments: A,
    ) -> Result<(), PublishError> {
        self.publish_record(Diagnostic::new_non_droppable(descriptor, arguments))
    }

    fn publish_record(&self, record: Diagnostic) -> Result<(), PublishError> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let (id, record) = inner.arena.allocate(record)?;
        let outcome = dispatch(&inner.subscriptions, inner.fallback.as_deref(), record);
        inner.arena.release(id);
        outcome
    }
}

/// Walks the subscriptions in insertion order and delivers `record`.
fn dispatch(
    subscriptions: &[Subscription],
    fallback: Option<&dyn Subscriber>,
    record: &Diagnostic,
) -> Result<(), PublishError> {
    let code = record.code();
    let mut matched = false;

    for subscription in subscriptions {
        if !subscription.matcher.matches(&code) {
            continue;
        }
        matched = true;

        let action = subscription
            .subscriber
            .process(record)
            .map_err(|source| PublishError::Subscriber {
                subscriber: subscription.subscriber.name(),
                source,
            })?;
        if record.droppable() && action == Action::Drop {
            return Ok(());
        }
    }

    if !matched {
        if let Some(fallback) = fallback {
            fallback
                .process(record)
                .map_err(|source| PublishError::Subscriber {
                    subscriber: fallback.name(),
                    source,
                })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::thread;

    use crate::error::SubscriberError;

    static ALPHABET_ERROR: Descriptor<(f32, f32)> =
        Descriptor::new("ABCDEF", "Alphabet error");
    static OTHER: Descriptor<()> = Descriptor::new("XYZ", "Unrelated diagnostic");

    /// Counts invocations and remembers its place in the delivery order.
    struct Recorder {
        tag: &'static str,
        hits: AtomicUsize,
        journal: Arc<Mutex<Vec<&'static str>>>,
        action: Action,
    }

    impl Recorder {
        fn arc(tag: &'static str, journal: &Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
            Self::arc_with(tag, journal, Action::Continue)
        }

        fn arc_with(
            tag: &'static str,
            journal: &Arc<Mutex<Vec<&'static str>>>,
            action: Action,
        ) -> Arc<Self> {
            Arc::new(Self {
                tag,
                hits: AtomicUsize::new(0),
                journal: Arc::clone(journal),
                action,
            })
        }

        fn hits(&self) -> usize {
            self.hits.load(AtomicOrdering::SeqCst)
        }
    }

    impl Subscriber for Recorder {
        fn process(&self, _diagnostic: &Diagnostic) -> Result<Action, SubscriberError> {
            self.hits.fetch_add(1, AtomicOrdering::SeqCst);
            self.journal.lock().push(self.tag);
            Ok(self.action)
        }

        fn name(&self) -> &'static str {
            self.tag
        }
    }

    /// Always fails; used to test error propagation.
    struct Faulty;

    impl Subscriber for Faulty {
        fn process(&self, _diagnostic: &Diagnostic) -> Result<Action, SubscriberError> {
            Err(SubscriberError::failed("boom"))
        }

        fn name(&self) -> &'static str {
            "faulty"
        }
    }

    #[test]
    fn test_delivery_follows_subscription_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let engine = Engine::new(EngineConfig::default());
        let s1 = Recorder::arc("s1", &journal);
        let s2 = Recorder::arc("s2", &journal);
        engine.subscribe("*", Arc::clone(&s1) as Arc<dyn Subscriber>);
        engine.subscribe("AB*", Arc::clone(&s2) as Arc<dyn Subscriber>);

        engine.publish(&ALPHABET_ERROR, (10.5f32, 21.6f32)).unwrap();
        assert_eq!(s1.hits(), 1);
        assert_eq!(s2.hits(), 1);
        assert_eq!(*journal.lock(), vec!["s1", "s2"]);

        engine.publish(&OTHER, ()).unwrap();
        assert_eq!(s1.hits(), 2);
        assert_eq!(s2.hits(), 1);
    }

    #[test]
    fn test_fallback_receives_only_unmatched_diagnostics() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let engine = Engine::new(EngineConfig::default());
        let filtered = Recorder::arc("filtered", &journal);
        let fallback = Recorder::arc("fallback", &journal);
        engine.subscribe("AB*", Arc::clone(&filtered) as Arc<dyn Subscriber>);
        engine.set_fallback(Arc::clone(&fallback) as Arc<dyn Subscriber>);

        engine.publish(&ALPHABET_ERROR, (1.0f32, 2.0f32)).unwrap();
        assert_eq!(filtered.hits(), 1);
        assert_eq!(fallback.hits(), 0);

        engine.publish(&OTHER, ()).unwrap();
        assert_eq!(filtered.hits(), 1);
        assert_eq!(fallback.hits(), 1);
    }

    #[test]
    fn test_drop_action_stops_propagation_of_droppable_records() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let engine = Engine::new(EngineConfig::default());
        let dropper = Recorder::arc_with("dropper", &journal, Action::Drop);
        let tail = Recorder::arc("tail", &journal);
        engine.subscribe("*", Arc::clone(&dropper) as Arc<dyn Subscriber>);
        engine.subscribe("*", Arc::clone(&tail) as Arc<dyn Subscriber>);

        engine.publish(&OTHER, ()).unwrap();
        assert_eq!(dropper.hits(), 1);
        assert_eq!(tail.hits(), 0);
    }

    #[test]
    fn test_drop_action_is_ignored_for_non_droppable_records() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let engine = Engine::new(EngineConfig::default());
        let dropper = Recorder::arc_with("dropper", &journal, Action::Drop);
        let tail = Recorder::arc("tail", &journal);
        engine.subscribe("*", Arc::clone(&dropper) as Arc<dyn Subscriber>);
        engine.subscribe("*", Arc::clone(&tail) as Arc<dyn Subscriber>);

        engine.publish_non_droppable(&OTHER, ()).unwrap();
        assert_eq!(dropper.hits(), 1);
        assert_eq!(tail.hits(), 1);
    }

    #[test]
    fn test_subscriber_failure_aborts_remaining_delivery() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let engine = Engine::new(EngineConfig::default());
        let tail = Recorder::arc("tail", &journal);
        engine.subscribe("*", Arc::new(Faulty));
        engine.subscribe("*", Arc::clone(&tail) as Arc<dyn Subscriber>);

        let err = engine.publish(&OTHER, ()).unwrap_err();
        assert_eq!(err.as_label(), "subscriber_failed");
        assert_eq!(tail.hits(), 0);

        // The arena slot was still released; the engine keeps working.
        engine.subscribe("none-shall-match", Arc::new(Faulty));
        let err = engine.publish(&OTHER, ()).unwrap_err();
        assert!(matches!(err, PublishError::Subscriber { subscriber, .. } if subscriber == "faulty"));
    }

    #[test]
    fn test_exhausted_arena_fails_the_publish_without_delivery() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let engine = Engine::new(EngineConfig { arena_budget: 1 });
        let subscriber = Recorder::arc("starved", &journal);
        engine.subscribe("*", Arc::clone(&subscriber) as Arc<dyn Subscriber>);

        let err = engine.publish(&OTHER, ()).unwrap_err();
        assert_eq!(err.as_label(), "arena_exhausted");
        assert_eq!(subscriber.hits(), 0);
    }

    #[test]
    fn test_concurrent_subscribes_then_publishes_stay_consistent() {
        const SUBSCRIBERS: usize = 8;
        const PUBLISHERS: usize = 4;
        const PER_PUBLISHER: usize = 32;

        let journal = Arc::new(Mutex::new(Vec::new()));
        let engine = Arc::new(Engine::new(EngineConfig::default()));

        let recorders: Vec<_> = (0..SUBSCRIBERS)
            .map(|_| Recorder::arc("concurrent", &journal))
            .collect();

        let handles: Vec<_> = recorders
            .iter()
            .map(|recorder| {
                let engine = Arc::clone(&engine);
                let recorder = Arc::clone(recorder);
                thread::spawn(move || engine.subscribe("AB*", recorder as Arc<dyn Subscriber>))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let handles: Vec<_> = (0..PUBLISHERS)
            .map(|_| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    for _ in 0..PER_PUBLISHER {
                        engine.publish(&ALPHABET_ERROR, (0.5f32, 1.5f32)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every subscription registered before the publishes began saw
        // every record exactly once.
        for recorder in &recorders {
            assert_eq!(recorder.hits(), PUBLISHERS * PER_PUBLISHER);
        }
        assert_eq!(
            journal.lock().len(),
            SUBSCRIBERS * PUBLISHERS * PER_PUBLISHER
        );
    }
}
