#![forbid(unsafe_code)]

//! Generic "property changed" event.

use std::fmt;

use vista_core::FieldKey;

use crate::reactive::Subscription;
use crate::reactive::subscription::SubscriberList;

/// Subscribable event raised once per actually-changed field.
pub struct ChangeEvent<K: FieldKey> {
    subscribers: SubscriberList<K>,
}

impl<K: FieldKey> ChangeEvent<K> {
    /// An event with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: SubscriberList::new(),
        }
    }

    /// Listen for changes. The callback receives the changed field's key.
    pub fn subscribe(&self, callback: impl Fn(K) + 'static) -> Subscription {
        self.subscribers.subscribe(move |key: &K| callback(*key))
    }

    /// Deliver `key` to every live subscriber.
    pub fn raise(&self, key: K) {
        self.subscribers.notify(&key);
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<K: FieldKey> Default for ChangeEvent<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FieldKey> fmt::Debug for ChangeEvent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEvent")
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}
