#![forbid(unsafe_code)]

//! The base every observable state embeds.
//!
//! [`StateCore<K>`] owns the loading flag, the generic change event, the
//! per-field handler table, and the command table. Concrete states keep one
//! as a field and route every setter through [`StateCore::assign`]:
//!
//! ```ignore
//! pub fn set_title(&mut self, title: String) {
//!     self.core.assign(&mut self.title, title, RosterField::Title);
//! }
//! ```
//!
//! # Invariants
//!
//! 1. `assign` with a value equal to the current one stores nothing and
//!    raises nothing.
//! 2. A changed field raises the generic event first, then the registered
//!    handler (if any), each exactly once.
//! 3. Handler and command tables are fixed at construction and shared, not
//!    copied, with siblings created by [`StateCore::sibling`].
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: a handler that reaches back into the same
//!   state through a `RefCell` while a setter is running will panic on the
//!   borrow. Handlers should schedule follow-up work instead.

use std::fmt;
use std::rc::Rc;

use tracing::trace;
use vista_core::{CommandResult, FieldKey};

use super::command::{Command, CommandMap, CommandTable};
use super::event::ChangeEvent;
use super::handlers::ChangeHandlers;
use crate::reactive::Subscription;

/// Loading flag, change notification, handlers, and commands for one state.
pub struct StateCore<K: FieldKey> {
    is_loading: bool,
    muted: bool,
    handlers: Rc<ChangeHandlers<K>>,
    commands: Rc<CommandTable>,
    changed: ChangeEvent<K>,
}

impl<K: FieldKey> StateCore<K> {
    /// Build a core from the owning component's handler table and actions.
    ///
    /// Both arguments are required; pass `ChangeHandlers::new()` or
    /// `CommandMap::new()` when there is nothing to register.
    #[must_use]
    pub fn new(handlers: ChangeHandlers<K>, commands: CommandMap) -> Self {
        Self {
            is_loading: false,
            muted: false,
            handlers: Rc::new(handlers),
            commands: Rc::new(CommandTable::from_map(commands)),
            changed: ChangeEvent::new(),
        }
    }

    /// A core with handlers only, for states with no bound user actions.
    #[must_use]
    pub fn with_handlers(handlers: ChangeHandlers<K>) -> Self {
        Self::new(handlers, CommandMap::new())
    }

    /// A fresh core sharing this one's handler and command tables.
    ///
    /// The sibling starts with `is_loading == false` and no subscribers.
    #[must_use]
    pub fn sibling(&self) -> Self {
        Self {
            is_loading: false,
            muted: false,
            handlers: Rc::clone(&self.handlers),
            commands: Rc::clone(&self.commands),
            changed: ChangeEvent::new(),
        }
    }

    /// Store `value` into `slot` and notify, unless it equals the current
    /// value. Returns whether the slot changed.
    pub fn assign<T: PartialEq>(&self, slot: &mut T, value: T, key: K) -> bool {
        if *slot == value {
            return false;
        }
        *slot = value;
        self.raise(key);
        true
    }

    /// Raise the change notification for `key` without touching any value.
    ///
    /// For computed fields whose inputs changed through another setter.
    pub fn raise(&self, key: K) {
        if self.muted {
            return;
        }
        trace!(field = key.name(), "field changed");
        self.changed.raise(key);
        self.handlers.dispatch(key);
    }

    /// Whether a reload or an external caller marked this state as loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub(crate) fn loading_flag(&self) -> &bool {
        &self.is_loading
    }

    /// Set the loading flag. Notifies under `K::IS_LOADING` when it changes.
    pub fn set_loading(&mut self, loading: bool) -> bool {
        if self.is_loading == loading {
            return false;
        }
        self.is_loading = loading;
        self.raise(K::IS_LOADING);
        true
    }

    /// Subscribe to the generic change event.
    pub fn subscribe(&self, callback: impl Fn(K) + 'static) -> Subscription {
        self.changed.subscribe(callback)
    }

    /// Registered change subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.changed.subscriber_count()
    }

    /// Per-field handler table.
    #[must_use]
    pub fn handlers(&self) -> &ChangeHandlers<K> {
        &self.handlers
    }

    /// Command table built at construction.
    #[must_use]
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Command bound to `name`.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Run the command bound to `name`.
    ///
    /// # Errors
    ///
    /// See [`CommandTable::execute`].
    pub fn execute(&self, name: &str) -> CommandResult {
        self.commands.execute(name)
    }

    /// Whether `other` shares this core's handler and command tables.
    #[must_use]
    pub fn shares_tables_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handlers, &other.handlers) && Rc::ptr_eq(&self.commands, &other.commands)
    }

    /// Suppress or resume notifications. Used while populating a clone.
    pub(crate) fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl<K: FieldKey> fmt::Debug for StateCore<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCore")
            .field("is_loading", &self.is_loading)
            .field("handlers", &self.handlers.len())
            .field("commands", &self.commands.names())
            .field("subscribers", &self.changed.subscriber_count())
            .finish()
    }
}
