#![forbid(unsafe_code)]

//! Per-field side-channel callbacks.
//!
//! The owning component registers extra reactions for specific fields. After
//! the generic change event fires, the state looks the changed key up here
//! and, on a hit, calls the handler with that key. A miss is not an error.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use vista_core::FieldKey;

type Handler<K> = Rc<dyn Fn(K)>;

/// Immutable dispatch table from field key to callback.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use vista_core::FieldKey;
/// use vista_runtime::ChangeHandlers;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Field { IsLoading, Total }
///
/// impl FieldKey for Field {
///     const IS_LOADING: Self = Self::IsLoading;
///     fn name(self) -> &'static str {
///         match self { Self::IsLoading => "is_loading", Self::Total => "total" }
///     }
/// }
///
/// let hits = Rc::new(Cell::new(0));
/// let h = Rc::clone(&hits);
/// let handlers = ChangeHandlers::new().on(Field::Total, move |_| h.set(h.get() + 1));
///
/// assert!(handlers.dispatch(Field::Total));
/// assert!(!handlers.dispatch(Field::IsLoading));
/// assert_eq!(hits.get(), 1);
/// ```
pub struct ChangeHandlers<K: FieldKey> {
    table: FxHashMap<K, Handler<K>>,
}

impl<K: FieldKey> ChangeHandlers<K> {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    /// Register `handler` for `key`, replacing any earlier one.
    #[must_use]
    pub fn on(mut self, key: K, handler: impl Fn(K) + 'static) -> Self {
        self.table.insert(key, Rc::new(handler));
        self
    }

    /// Invoke the handler registered for `key`. Returns whether one ran.
    pub fn dispatch(&self, key: K) -> bool {
        match self.table.get(&key) {
            Some(handler) => {
                let handler = Rc::clone(handler);
                handler(key);
                true
            }
            None => false,
        }
    }

    /// Whether a handler is registered for `key`.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.table.contains_key(&key)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: FieldKey> Default for ChangeHandlers<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FieldKey> fmt::Debug for ChangeHandlers<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&'static str> = self.table.keys().map(|k| k.name()).collect();
        keys.sort_unstable();
        f.debug_struct("ChangeHandlers").field("keys", &keys).finish()
    }
}
