// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topic-based event hub with ordered, sequential delivery.

use std::borrow::Cow;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::RwLock;

use super::{Delivery, Event, FailurePolicy, Payload, Topic};
use crate::error::{Error, HandlerError, Result, panic_message};
use crate::subscription::{Handler, HandlerFn};

type Registry = HashMap<Topic, Vec<Arc<dyn Handler>>>;

/// Central dispatcher decoupling producers from subscribers by topic.
///
/// # Delivery contract
///
/// - Handlers of a topic are invoked in subscription order, one at a time.
///   Each handler is awaited to completion before the next one starts, and
///   [`emit`](Self::emit) returns only after the last one finishes.
/// - Emitting on a topic nobody subscribed to is a no-op, not an error.
/// - Subscribing the same handler twice makes it run twice per emission.
/// - Emissions from different tasks are not serialized against each other;
///   they may interleave wherever a handler suspends.
///
/// # Concurrency
///
/// The registry sits behind a `parking_lot::RwLock`. An emission takes a
/// snapshot of the topic's handlers and releases the lock before awaiting
/// anything, so [`subscribe`](Self::subscribe) never waits on a running
/// emission. A handler registered while an emission is in flight is first
/// invoked by the next emission.
///
/// Cloning the hub is cheap; all clones share one registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use sensorhub::EventHub;
/// use sensorhub::event::Topic;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> sensorhub::Result<()> {
/// let hub = EventHub::new();
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&seen);
/// hub.subscribe_fn(Topic::MOTION_DETECTED, "counter", move |_event| {
///     let counter = Arc::clone(&counter);
///     async move {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }
/// });
///
/// let delivery = hub.publish(sensorhub::Event::motion("Kitchen")).await?;
/// assert_eq!(delivery.invoked, 1);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EventHub {
    registry: Arc<RwLock<Registry>>,
    policy: FailurePolicy,
}

impl EventHub {
    /// Creates a hub with an empty registry that isolates handler failures.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::default())
    }

    /// Creates a hub with an empty registry and the given failure policy.
    #[must_use]
    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            registry: Arc::new(RwLock::new(HashMap::new())),
            policy,
        }
    }

    /// Returns the failure policy.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Appends a handler to the topic's subscriber list.
    ///
    /// The topic does not need to exist beforehand. Registrations are never
    /// deduplicated.
    pub fn subscribe(&self, topic: impl Into<Topic>, handler: Arc<dyn Handler>) {
        let topic = topic.into();
        tracing::debug!(%topic, handler = handler.name(), "Subscribing handler");
        self.registry.write().entry(topic).or_default().push(handler);
    }

    /// Subscribes an async closure under the given name.
    pub fn subscribe_fn<F, Fut>(
        &self,
        topic: impl Into<Topic>,
        name: impl Into<Cow<'static, str>>,
        f: F,
    ) where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), HandlerError>> + Send + 'static,
    {
        self.subscribe(topic, HandlerFn::arc(name, f));
    }

    /// Returns the number of registrations for a topic.
    #[must_use]
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.registry.read().get(topic).map_or(0, Vec::len)
    }

    /// Returns the number of topics with at least one registration.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Returns the topics with at least one registration, sorted by name.
    #[must_use]
    pub fn topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.registry.read().keys().cloned().collect();
        topics.sort();
        topics
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Emits an event built from a topic and a payload.
    ///
    /// See [`publish`](Self::publish) for the delivery semantics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Delivery`] if a handler fails and the hub runs with
    /// [`FailurePolicy::Propagate`].
    pub async fn emit(&self, topic: impl Into<Topic>, payload: Payload) -> Result<Delivery> {
        self.publish(Event::new(topic, payload)).await
    }

    /// Delivers an event to every handler subscribed to its topic.
    ///
    /// Handlers run sequentially in subscription order. Handler panics are
    /// caught and treated as failures. With [`FailurePolicy::Isolate`] a
    /// failure is logged and delivery continues; with
    /// [`FailurePolicy::Propagate`] the remaining handlers are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Delivery`] if a handler fails and the hub runs with
    /// [`FailurePolicy::Propagate`].
    pub async fn publish(&self, event: Event) -> Result<Delivery> {
        let handlers = self.registry.read().get(event.topic()).cloned();
        let mut delivery = Delivery::default();

        let Some(handlers) = handlers else {
            return Ok(delivery);
        };

        for handler in handlers {
            delivery.invoked += 1;

            match invoke(handler.as_ref(), &event).await {
                Ok(()) => delivery.succeeded += 1,
                Err(source) => match self.policy {
                    FailurePolicy::Isolate => {
                        delivery.failed += 1;
                        tracing::warn!(
                            topic = %event.topic(),
                            handler = handler.name(),
                            error = %source,
                            "Handler failed, continuing delivery"
                        );
                    }
                    FailurePolicy::Propagate => {
                        return Err(Error::Delivery {
                            topic: event.topic().clone(),
                            handler: handler.name().to_string(),
                            source,
                        });
                    }
                },
            }
        }

        Ok(delivery)
    }
}

/// Runs one handler, converting a panic into [`HandlerError::Panicked`].
async fn invoke(handler: &dyn Handler, event: &Event) -> std::result::Result<(), HandlerError> {
    match AssertUnwindSafe(handler.handle(event)).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(HandlerError::Panicked(panic_message(&*panic))),
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("topic_count", &self.topic_count())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    use parking_lot::Mutex;

    /// Subscribes a handler that logs its start and end around a short sleep.
    fn subscribe_traced(
        hub: &EventHub,
        topic: Topic,
        label: &'static str,
        log: &Arc<Mutex<Vec<String>>>,
    ) {
        let log = Arc::clone(log);
        hub.subscribe_fn(topic, label, move |_event| {
            let log = Arc::clone(&log);
            async move {
                log.lock().push(format!("{label}:start"));
                tokio::time::sleep(Duration::from_millis(10)).await;
                log.lock().push(format!("{label}:end"));
                Ok(())
            }
        });
    }

    fn explode() -> std::result::Result<(), HandlerError> {
        panic!("handler exploded")
    }

    fn counting(hub: &EventHub, topic: Topic, counter: &Arc<AtomicU32>) {
        let counter = Arc::clone(counter);
        hub.subscribe_fn(topic, "counter", move |_event| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
    }

    #[test]
    fn new_hub_is_empty() {
        let hub = EventHub::new();
        assert_eq!(hub.topic_count(), 0);
        assert_eq!(hub.subscriber_count(&Topic::MOTION_DETECTED), 0);
        assert_eq!(hub.policy(), FailurePolicy::Isolate);
    }

    #[test]
    fn subscribe_creates_topic() {
        let hub = EventHub::new();
        let counter = Arc::new(AtomicU32::new(0));

        counting(&hub, Topic::MOTION_DETECTED, &counter);
        counting(&hub, Topic::MOTION_DETECTED, &counter);
        counting(&hub, Topic::TEMPERATURE_UPDATE, &counter);

        assert_eq!(hub.topic_count(), 2);
        assert_eq!(hub.subscriber_count(&Topic::MOTION_DETECTED), 2);
        assert_eq!(
            hub.topics(),
            vec![Topic::MOTION_DETECTED, Topic::TEMPERATURE_UPDATE]
        );
    }

    #[tokio::test]
    async fn emit_without_subscribers_is_noop() {
        let hub = EventHub::with_policy(FailurePolicy::Propagate);
        let delivery = hub
            .emit("nobody_listens", Payload::new().with("value", 1))
            .await
            .unwrap();

        assert!(delivery.is_empty());
        assert_eq!(hub.topic_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn handlers_run_sequentially_in_subscription_order() {
        let hub = EventHub::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        subscribe_traced(&hub, Topic::MOTION_DETECTED, "first", &log);
        subscribe_traced(&hub, Topic::MOTION_DETECTED, "second", &log);
        subscribe_traced(&hub, Topic::MOTION_DETECTED, "third", &log);

        let delivery = hub.publish(Event::motion("Hall")).await.unwrap();

        assert_eq!(delivery.invoked, 3);
        assert_eq!(delivery.succeeded, 3);
        assert_eq!(
            *log.lock(),
            vec![
                "first:start",
                "first:end",
                "second:start",
                "second:end",
                "third:start",
                "third:end",
            ]
        );
    }

    #[tokio::test]
    async fn duplicate_subscription_is_invoked_twice() {
        let hub = EventHub::new();
        let counter = Arc::new(AtomicU32::new(0));
        let handler = HandlerFn::arc("shared", {
            let counter = Arc::clone(&counter);
            move |_event| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }
        });

        hub.subscribe(Topic::MOTION_DETECTED, handler.clone());
        hub.subscribe(Topic::MOTION_DETECTED, handler);

        hub.publish(Event::motion("Hall")).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn emit_only_reaches_matching_topic() {
        let hub = EventHub::new();
        let motion = Arc::new(AtomicU32::new(0));
        let temperature = Arc::new(AtomicU32::new(0));

        counting(&hub, Topic::MOTION_DETECTED, &motion);
        counting(&hub, Topic::TEMPERATURE_UPDATE, &temperature);

        hub.publish(Event::temperature(22)).await.unwrap();

        assert_eq!(motion.load(Ordering::SeqCst), 0);
        assert_eq!(temperature.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn isolate_policy_continues_after_failure() {
        let hub = EventHub::new();
        let counter = Arc::new(AtomicU32::new(0));

        hub.subscribe_fn(Topic::MOTION_DETECTED, "failing", |_event| async {
            Err(HandlerError::rejected("sensor offline"))
        });
        counting(&hub, Topic::MOTION_DETECTED, &counter);

        let delivery = hub.publish(Event::motion("Hall")).await.unwrap();

        assert_eq!(delivery.invoked, 2);
        assert_eq!(delivery.succeeded, 1);
        assert_eq!(delivery.failed, 1);
        assert!(!delivery.is_clean());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn isolate_policy_contains_panics() {
        let hub = EventHub::new();
        let counter = Arc::new(AtomicU32::new(0));

        hub.subscribe_fn(Topic::MOTION_DETECTED, "panicking", |_event| async {
            explode()
        });
        counting(&hub, Topic::MOTION_DETECTED, &counter);

        let delivery = hub.publish(Event::motion("Hall")).await.unwrap();

        assert_eq!(delivery.failed, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn propagate_policy_stops_at_first_failure() {
        let hub = EventHub::with_policy(FailurePolicy::Propagate);
        let counter = Arc::new(AtomicU32::new(0));

        counting(&hub, Topic::MOTION_DETECTED, &counter);
        hub.subscribe_fn(Topic::MOTION_DETECTED, "failing", |_event| async {
            Err(HandlerError::rejected("sensor offline"))
        });
        counting(&hub, Topic::MOTION_DETECTED, &counter);

        let err = hub.publish(Event::motion("Hall")).await.unwrap_err();

        assert!(matches!(
            &err,
            Error::Delivery { topic, handler, source: HandlerError::Rejected(_) }
                if *topic == Topic::MOTION_DETECTED && handler == "failing"
        ));
        // Only the handler before the failing one ran.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn propagate_policy_reports_panics() {
        let hub = EventHub::with_policy(FailurePolicy::Propagate);
        hub.subscribe_fn(Topic::MOTION_DETECTED, "panicking", |_event| async {
            explode()
        });

        let err = hub.publish(Event::motion("Hall")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Delivery { source: HandlerError::Panicked(msg), .. } if msg == "handler exploded"
        ));
    }

    #[tokio::test]
    async fn subscribe_during_emit_applies_to_next_emission() {
        let hub = EventHub::new();
        let late_calls = Arc::new(AtomicU32::new(0));
        let registered = Arc::new(AtomicBool::new(false));

        let hub_for_handler = hub.clone();
        let late_for_handler = Arc::clone(&late_calls);
        hub.subscribe_fn(Topic::MOTION_DETECTED, "registrar", move |_event| {
            let hub = hub_for_handler.clone();
            let late = Arc::clone(&late_for_handler);
            let registered = Arc::clone(&registered);
            async move {
                if !registered.swap(true, Ordering::SeqCst) {
                    counting(&hub, Topic::MOTION_DETECTED, &late);
                }
                Ok(())
            }
        });

        let first = hub.publish(Event::motion("Hall")).await.unwrap();
        assert_eq!(first.invoked, 1);
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        let second = hub.publish(Event::motion("Hall")).await.unwrap();
        assert_eq!(second.invoked, 2);
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clones_share_registry() {
        let hub = EventHub::new();
        let clone = hub.clone();
        let counter = Arc::new(AtomicU32::new(0));

        counting(&clone, Topic::TEMPERATURE_UPDATE, &counter);
        assert_eq!(hub.subscriber_count(&Topic::TEMPERATURE_UPDATE), 1);

        hub.emit(Topic::TEMPERATURE_UPDATE, Payload::new().with("value", 20))
            .await
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_shows_topic_count() {
        let hub = EventHub::new();
        let debug = format!("{hub:?}");
        assert!(debug.contains("EventHub"));
        assert!(debug.contains("topic_count"));
    }
}
