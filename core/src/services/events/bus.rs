//! Booking event bus.
//!
//! A synchronous, in-process fan-out of [`BookingEvent`]s to registered
//! listeners. There is no buffering and no replay: a listener only sees
//! events published while it is registered.
//!
//! ```text
//! BookingService ── publish(event) ──> EventBus ──> listener (stream A)
//!                                          ├──────> listener (stream B)
//!                                          └──────> ...
//! ```
//!
//! The bus does not filter by recipient. Listeners receive every event of
//! the kinds they registered for and drop the ones not addressed to them.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::events::{BookingEvent, BookingEventKind};

/// Failure reported by a listener
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The receiving end is gone; the listener is removed
    #[error("listener disconnected")]
    Disconnected,

    /// Delivery failed this time; the listener stays registered
    #[error("listener failed: {0}")]
    Failed(String),
}

/// Receiver of booking events
pub trait BookingListener: Send + Sync {
    fn on_event(&self, event: &BookingEvent) -> Result<(), ListenerError>;
}

impl<F> BookingListener for F
where
    F: Fn(&BookingEvent) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_event(&self, event: &BookingEvent) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Identifies one registration on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: u64,
    kind: BookingEventKind,
}

impl SubscriptionHandle {
    pub fn kind(&self) -> BookingEventKind {
        self.kind
    }
}

/// Outcome of one publish call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub failed: usize,
    pub removed: usize,
}

struct Registration {
    id: u64,
    listener: Arc<dyn BookingListener>,
}

/// Publish/subscribe registry for booking events
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<HashMap<BookingEventKind, Vec<Registration>>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`
    pub fn subscribe<L>(&self, kind: BookingEventKind, listener: L) -> SubscriptionHandle
    where
        L: BookingListener + 'static,
    {
        self.register(kind, Arc::new(listener))
    }

    /// Removes a registration; false if it was already gone
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let Some(registrations) = listeners.get_mut(&handle.kind) else {
            return false;
        };

        let before = registrations.len();
        registrations.retain(|r| r.id != handle.id);
        let removed = registrations.len() != before;

        if registrations.is_empty() {
            listeners.remove(&handle.kind);
        }
        removed
    }

    /// Registers one listener for several kinds; dropping the guard unsubscribes all of them
    pub fn subscribe_scoped<L>(self: &Arc<Self>, kinds: &[BookingEventKind], listener: L) -> Subscription
    where
        L: BookingListener + 'static,
    {
        let listener: Arc<dyn BookingListener> = Arc::new(listener);
        let handles = kinds
            .iter()
            .map(|kind| self.register(*kind, Arc::clone(&listener)))
            .collect();

        Subscription {
            bus: Arc::downgrade(self),
            handles,
        }
    }

    /// Delivers `event` to every listener registered for its kind
    ///
    /// Listeners run on the caller's thread, outside the registry lock.
    /// Failures are logged and never reach the publisher.
    pub fn publish(&self, event: &BookingEvent) -> PublishReport {
        let targets: Vec<(u64, Arc<dyn BookingListener>)> = {
            let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
            listeners
                .get(&event.kind)
                .map(|regs| regs.iter().map(|r| (r.id, Arc::clone(&r.listener))).collect())
                .unwrap_or_default()
        };

        let mut report = PublishReport::default();
        let mut dead = Vec::new();

        for (id, listener) in targets {
            match catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(ListenerError::Disconnected)) => {
                    debug!(listener = id, event = %event.kind, "Listener disconnected");
                    dead.push(id);
                }
                Ok(Err(ListenerError::Failed(reason))) => {
                    warn!(listener = id, event = %event.kind, %reason, "Listener failed");
                    report.failed += 1;
                }
                Err(_) => {
                    error!(listener = id, event = %event.kind, "Listener panicked; removing it");
                    report.failed += 1;
                    dead.push(id);
                }
            }
        }

        if !dead.is_empty() {
            report.removed = self.remove_ids(event.kind, &dead);
        }
        report
    }

    /// Number of listeners registered for `kind`
    pub fn listener_count(&self, kind: BookingEventKind) -> usize {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        listeners.get(&kind).map_or(0, Vec::len)
    }

    fn register(&self, kind: BookingEventKind, listener: Arc<dyn BookingListener>) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.entry(kind).or_default().push(Registration { id, listener });
        SubscriptionHandle { id, kind }
    }

    fn remove_ids(&self, kind: BookingEventKind, ids: &[u64]) -> usize {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let Some(registrations) = listeners.get_mut(&kind) else {
            return 0;
        };
        let before = registrations.len();
        registrations.retain(|r| !ids.contains(&r.id));
        let removed = before - registrations.len();
        if registrations.is_empty() {
            listeners.remove(&kind);
        }
        removed
    }
}

/// Guard over a group of registrations
///
/// Holds only a weak reference so an outstanding guard never keeps the bus alive.
pub struct Subscription {
    bus: Weak<EventBus>,
    handles: Vec<SubscriptionHandle>,
}

impl Subscription {
    pub fn handles(&self) -> &[SubscriptionHandle] {
        &self.handles
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            for handle in self.handles.drain(..) {
                bus.unsubscribe(handle);
            }
        }
    }
}
