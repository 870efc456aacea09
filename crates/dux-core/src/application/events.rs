//! In-memory event log with synchronous notification.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::trace;

use crate::application::ports::{EventStore, Subscriber};
use crate::domain::Event;

/// Handle returned by [`EventStore::subscribe`].
///
/// The subscriber stays live until [`unsubscribe`](Self::unsubscribe) is
/// called or the handle is dropped. Call [`detach`](Self::detach) to keep it
/// for the lifetime of the store instead.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Build a handle that runs `cancel` once on unsubscribe.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop receiving events. Calling this more than once is a no-op.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the subscriber registered after this handle goes away.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
struct Log {
    events: Vec<Event>,
    // Slots are never removed so indices held by subscriptions stay valid.
    subscribers: Vec<Option<Subscriber>>,
}

/// Keeps events in memory for the lifetime of the process.
///
/// Cloning yields another handle to the same log.
#[derive(Clone, Default)]
pub struct TransientEventStore {
    log: Arc<Mutex<Log>>,
}

impl TransientEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.log).subscribers.iter().flatten().count()
    }

    fn slot_count(&self) -> usize {
        lock(&self.log).subscribers.len()
    }

    /// The subscriber in `slot`, unless it has been unsubscribed.
    fn live_subscriber(&self, slot: usize) -> Option<Subscriber> {
        lock(&self.log).subscribers.get(slot).cloned().flatten()
    }
}

impl EventStore for TransientEventStore {
    fn emit(&self, events: Vec<Event>) {
        lock(&self.log).events.extend(events.iter().cloned());

        // Callbacks run unlocked so they may read the log or (un)subscribe.
        // Each slot is re-read right before its call, so an unsubscribe made
        // by an earlier callback takes effect within the same event.
        for event in &events {
            trace!(event = event.name(), "emit");
            for slot in 0..self.slot_count() {
                if let Some(subscriber) = self.live_subscriber(slot) {
                    subscriber(event);
                }
            }
        }
    }

    fn subscribe(&self, subscriber: Subscriber) -> Subscription {
        let slot = {
            let mut log = lock(&self.log);
            log.subscribers.push(Some(subscriber));
            log.subscribers.len() - 1
        };

        let log: Weak<Mutex<Log>> = Arc::downgrade(&self.log);
        Subscription::new(move || {
            if let Some(log) = log.upgrade() {
                if let Some(entry) = lock(&log).subscribers.get_mut(slot) {
                    *entry = None;
                }
            }
        })
    }

    fn all(&self) -> Vec<Event> {
        lock(&self.log).events.clone()
    }
}

impl fmt::Debug for TransientEventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = lock(&self.log);
        f.debug_struct("TransientEventStore")
            .field("events", &log.events.len())
            .field("slots", &log.subscribers.len())
            .finish()
    }
}

// A panicking subscriber must not take the log down with it.
fn lock(log: &Mutex<Log>) -> MutexGuard<'_, Log> {
    log.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Subscriber) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, Arc::new(move |_: &Event| {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    fn created() -> Event {
        Event::new(EventKind::BlueprintCreated)
    }

    #[test]
    fn emit_appends_in_order() {
        let store = TransientEventStore::new();
        store.emit(vec![created(), Event::new(EventKind::FileRenamed)]);
        store.emit(vec![Event::new(EventKind::TemplateRendered)]);

        let names: Vec<_> = store.all().iter().map(Event::name).collect();
        assert_eq!(names, vec!["blueprint-created", "file-renamed", "template-rendered"]);
    }

    #[test]
    fn every_subscriber_sees_every_event_once() {
        let store = TransientEventStore::new();
        let (a, sub_a) = counter();
        let (b, sub_b) = counter();
        let _ha = store.subscribe(sub_a);
        let _hb = store.subscribe(sub_b);

        store.emit(vec![created(), created()]);

        assert_eq!(a.load(Ordering::SeqCst), 2);
        assert_eq!(b.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let store = TransientEventStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut handles = Vec::new();
        for id in 0..3 {
            let order = Arc::clone(&order);
            handles.push(store.subscribe(Arc::new(move |_: &Event| {
                order.lock().unwrap().push(id);
            })));
        }

        store.emit(vec![created()]);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribed_listener_receives_nothing() {
        let store = TransientEventStore::new();
        let (a, sub_a) = counter();
        let (b, sub_b) = counter();
        let mut ha = store.subscribe(sub_a);
        let _hb = store.subscribe(sub_b);

        store.emit(vec![created()]);
        ha.unsubscribe();
        ha.unsubscribe();
        store.emit(vec![created()]);

        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 2);
        assert!(!ha.is_active());
    }

    #[test]
    fn slots_stay_stable_after_unsubscribe() {
        let store = TransientEventStore::new();
        let (a, sub_a) = counter();
        let (b, sub_b) = counter();
        let (c, sub_c) = counter();
        let mut ha = store.subscribe(sub_a);
        let mut hb = store.subscribe(sub_b);
        let _hc = store.subscribe(sub_c);

        ha.unsubscribe();
        store.emit(vec![created()]);
        hb.unsubscribe();
        store.emit(vec![created()]);

        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(c.load(Ordering::SeqCst), 2);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn dropping_handle_unsubscribes_and_detach_keeps() {
        let store = TransientEventStore::new();
        let (dropped, sub_dropped) = counter();
        let (kept, sub_kept) = counter();

        drop(store.subscribe(sub_dropped));
        store.subscribe(sub_kept).detach();
        store.emit(vec![created()]);

        assert_eq!(dropped.load(Ordering::SeqCst), 0);
        assert_eq!(kept.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscriber_may_read_the_log() {
        let store = TransientEventStore::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let (reader, s) = (store.clone(), Arc::clone(&seen));
        let _h = store.subscribe(Arc::new(move |_: &Event| {
            s.store(reader.all().len(), Ordering::SeqCst);
        }));

        store.emit(vec![created(), created()]);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_from_a_callback_takes_effect_immediately() {
        let store = TransientEventStore::new();
        let (b, sub_b) = counter();
        let hb = Arc::new(Mutex::new(None::<Subscription>));

        let target = Arc::clone(&hb);
        store
            .subscribe(Arc::new(move |_: &Event| {
                if let Some(mut handle) = target.lock().unwrap().take() {
                    handle.unsubscribe();
                }
            }))
            .detach();
        *hb.lock().unwrap() = Some(store.subscribe(sub_b));

        store.emit(vec![created(), created()]);

        assert_eq!(b.load(Ordering::SeqCst), 0);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn subscriber_added_during_emit_starts_with_next_event() {
        let store = TransientEventStore::new();
        let (late, sub_late) = counter();
        let pending = Arc::new(Mutex::new(Some(sub_late)));

        let (registrar, pending_sub) = (store.clone(), Arc::clone(&pending));
        store
            .subscribe(Arc::new(move |_: &Event| {
                if let Some(sub) = pending_sub.lock().unwrap().take() {
                    registrar.subscribe(sub).detach();
                }
            }))
            .detach();

        store.emit(vec![created(), created()]);

        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_after_store_dropped_is_harmless() {
        let store = TransientEventStore::new();
        let (_, sub) = counter();
        let mut handle = store.subscribe(sub);
        drop(store);
        handle.unsubscribe();
    }
}
