//! Process-wide settings channel.
//!
//! The store owns the committed [`Settings`] value and notifies subscribers
//! whenever a new value is published. Everything runs on the caller's
//! thread; callbacks are invoked synchronously from [`SettingsStore::publish`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::Settings;

/// Callback invoked with each published settings value.
pub type SettingsCallback = Box<dyn Fn(&Settings)>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Publish/subscribe interface for committed settings.
pub trait SettingsChannel {
    /// Register a callback for every future publish.
    fn subscribe(&self, callback: SettingsCallback) -> SubscriptionId;

    /// Remove a callback. Returns false if the id was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Publish a new committed value to every subscriber.
    fn publish(&self, settings: Settings);
}

/// In-process settings store.
pub struct SettingsStore {
    current: RefCell<Settings>,
    subscribers: RefCell<Vec<(SubscriptionId, Rc<dyn Fn(&Settings)>)>>,
    next_id: Cell<u64>,
    /// Bumped on every publish; a delivery stops once it is no longer current.
    generation: Cell<u64>,
}

impl SettingsStore {
    /// Create a store holding `initial` as the committed value.
    pub fn new(initial: Settings) -> Self {
        Self {
            current: RefCell::new(initial),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            generation: Cell::new(0),
        }
    }

    /// A copy of the committed value.
    pub fn current(&self) -> Settings {
        self.current.borrow().clone()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl SettingsChannel for SettingsStore {
    fn subscribe(&self, callback: SettingsCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::from(callback)));
        tracing::trace!("settings subscriber {:?} added", id);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != subscribers.len()
    }

    fn publish(&self, settings: Settings) {
        *self.current.borrow_mut() = settings.clone();
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        // Snapshot so callbacks may publish or (un)subscribe re-entrantly
        let subscribers: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        tracing::debug!("publishing settings to {} subscriber(s)", subscribers.len());
        for callback in subscribers {
            // A callback published a newer value, which has already reached
            // every subscriber
            if self.generation.get() != generation {
                tracing::trace!("settings superseded during delivery, stopping");
                break;
            }
            callback(&settings);
        }
    }
}
