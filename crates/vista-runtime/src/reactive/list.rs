#![forbid(unsafe_code)]

//! Observable list with item-level change notification.
//!
//! # Design
//!
//! [`ObservableList<T>`] keeps its items in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Cloning the list clones the *handle*: both handles see
//! the same items and share subscribers. To get an independent list holding
//! the same elements use [`ObservableList::duplicate`]; this is what ordered
//! copy does for container fields.
//!
//! Equality is handle identity. Two lists with equal items but separate
//! storage are different values, which is what state setters need to decide
//! whether a container field actually changed.
//!
//! # Performance
//!
//! | Operation     | Complexity                      |
//! |---------------|---------------------------------|
//! | `get()`       | O(1)                            |
//! | `push()`      | O(1) amortized + O(S) notify    |
//! | `insert()`    | O(n) + O(S) notify              |
//! | `duplicate()` | O(n) element clones             |
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: mutating the list from within one of its own
//!   subscribers is allowed (the item borrow is released before notifying),
//!   but the nested change is delivered before the outer notification
//!   finishes. Keep subscriber graphs acyclic.
//! - **Out-of-range index**: `remove`, `replace` and `move_item` return `None`
//!   / `false` and emit nothing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::container::ObservableContainer;
use super::subscription::{SubscriberList, Subscription};

/// What changed in an [`ObservableList`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListChange<T> {
    /// `item` was inserted at `index`.
    Added { index: usize, item: T },
    /// `item` was removed from `index`.
    Removed { index: usize, item: T },
    /// The item at `index` was replaced.
    Replaced { index: usize, old: T, new: T },
    /// The item at `from` now lives at `to`.
    Moved { from: usize, to: usize },
    /// The whole contents changed (clear or bulk replace).
    Reset,
}

struct ListInner<T> {
    items: Vec<T>,
    version: u64,
}

/// A shared, version-tracked list that reports item-level changes.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 per emitted change.
/// 2. Every mutation that alters the items emits exactly one [`ListChange`].
/// 3. Subscribers are notified in registration order, after the item borrow
///    has been released.
pub struct ObservableList<T> {
    inner: Rc<RefCell<ListInner<T>>>,
    subscribers: Rc<SubscriberList<ListChange<T>>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T> PartialEq for ObservableList<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for ObservableList<T> {}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ObservableList")
            .field("items", &inner.items)
            .field("version", &inner.version)
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone + 'static> ObservableList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a list holding `items`. The initial version is 0.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListInner { items, version: 0 })),
            subscribers: Rc::new(SubscriberList::new()),
        }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// Whether the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }

    /// Clone of the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.borrow().items.get(index).cloned()
    }

    /// Clone of all items.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    /// Borrow the items for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.borrow().items)
    }

    /// Append an item.
    pub fn push(&self, item: T) {
        let index = {
            let mut inner = self.inner.borrow_mut();
            inner.items.push(item.clone());
            inner.version += 1;
            inner.items.len() - 1
        };
        self.emit(ListChange::Added { index, item });
    }

    /// Insert an item at `index`, shifting later items right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&self, index: usize, item: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.items.insert(index, item.clone());
            inner.version += 1;
        }
        self.emit(ListChange::Added { index, item });
    }

    /// Remove and return the item at `index`, if any.
    pub fn remove(&self, index: usize) -> Option<T> {
        let item = {
            let mut inner = self.inner.borrow_mut();
            if index >= inner.items.len() {
                return None;
            }
            inner.version += 1;
            inner.items.remove(index)
        };
        self.emit(ListChange::Removed {
            index,
            item: item.clone(),
        });
        Some(item)
    }

    /// Replace the item at `index`, returning the old one.
    pub fn replace(&self, index: usize, item: T) -> Option<T> {
        let old = {
            let mut inner = self.inner.borrow_mut();
            let slot = inner.items.get_mut(index)?;
            let old = std::mem::replace(slot, item.clone());
            inner.version += 1;
            old
        };
        self.emit(ListChange::Replaced {
            index,
            old: old.clone(),
            new: item,
        });
        Some(old)
    }

    /// Move the item at `from` to `to`. Returns `false` if either index is
    /// out of range. Moving an item onto itself is a no-op.
    pub fn move_item(&self, from: usize, to: usize) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            let len = inner.items.len();
            if from >= len || to >= len {
                return false;
            }
            if from == to {
                return true;
            }
            let item = inner.items.remove(from);
            inner.items.insert(to, item);
            inner.version += 1;
        }
        self.emit(ListChange::Moved { from, to });
        true
    }

    /// Remove every item. Clearing an empty list emits nothing.
    pub fn clear(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.items.is_empty() {
                return;
            }
            inner.items.clear();
            inner.version += 1;
        }
        self.emit(ListChange::Reset);
    }

    /// Swap in new contents wholesale.
    pub fn replace_all(&self, items: Vec<T>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.items = items;
            inner.version += 1;
        }
        self.emit(ListChange::Reset);
    }

    /// Subscribe to item-level changes.
    pub fn subscribe(&self, callback: impl Fn(&ListChange<T>) + 'static) -> Subscription {
        self.subscribers.subscribe(callback)
    }

    /// Number of registered subscribers (including dead ones not yet
    /// pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Current version. Increments once per emitted change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Whether both handles point at the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A new list holding clones of the current items, with its own storage,
    /// version 0, and no subscribers.
    ///
    /// Elements are cloned, not deep-copied: a list of `Rc`/[`Shared`]
    /// handles duplicates the handles and keeps pointing at the same
    /// objects.
    ///
    /// [`Shared`]: super::Shared
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self::from_vec(self.to_vec())
    }

    fn emit(&self, change: ListChange<T>) {
        self.subscribers.notify(&change);
    }
}

impl<T: Clone + 'static> ObservableContainer for ObservableList<T> {
    fn duplicate(&self) -> Self {
        ObservableList::duplicate(self)
    }
}
