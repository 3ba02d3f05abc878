#![forbid(unsafe_code)]

//! Weak subscriber lists with RAII unsubscription.
//!
//! # Design
//!
//! A [`SubscriberList<A>`] stores callbacks as `Weak<dyn Fn(&A)>`. The strong
//! `Rc` lives inside the [`Subscription`] guard handed back to the caller, so
//! dropping the guard makes the callback unreachable. Dead entries are pruned
//! lazily on the next [`SubscriberList::notify`].
//!
//! Callbacks are collected before any of them runs, so a callback may
//! subscribe further listeners without tripping a `RefCell` borrow. Listeners
//! added during a notification first fire on the next one.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<A> = Rc<dyn Fn(&A)>;
type CallbackWeak<A> = Weak<dyn Fn(&A)>;

/// Ordered list of weakly held listeners for values of type `A`.
pub(crate) struct SubscriberList<A: ?Sized> {
    entries: RefCell<Vec<CallbackWeak<A>>>,
}

impl<A: ?Sized> Default for SubscriberList<A> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<A: ?Sized> SubscriberList<A> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registered listeners, including dead ones not yet pruned.
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl<A: ?Sized + 'static> SubscriberList<A> {
    /// Register `callback`. It stays live while the returned guard does.
    pub(crate) fn subscribe(&self, callback: impl Fn(&A) + 'static) -> Subscription {
        let strong: CallbackRc<A> = Rc::new(callback);
        self.entries.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Call every live listener with `arg`, in registration order.
    pub(crate) fn notify(&self, arg: &A) {
        let callbacks: Vec<CallbackRc<A>> = {
            let mut entries = self.entries.borrow_mut();
            entries.retain(|w| w.strong_count() > 0);
            entries.iter().filter_map(Weak::upgrade).collect()
        };
        for cb in &callbacks {
            cb(arg);
        }
    }
}

impl<A: ?Sized> fmt::Debug for SubscriberList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.entries.borrow().len())
            .finish()
    }
}

/// RAII guard for a listener.
///
/// Dropping the `Subscription` drops the only strong reference to the
/// callback; the list entry fails to upgrade from then on and is pruned on
/// the next notification.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
