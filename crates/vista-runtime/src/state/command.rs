#![forbid(unsafe_code)]

//! Bound user actions.
//!
//! A state that drives a view exposes its user actions as named, invokable
//! [`Command`]s. The owning component supplies a [`CommandMap`] of
//! zero-argument actions at construction; the state wraps each one and keeps
//! the resulting [`CommandTable`] for its lifetime.
//!
//! # Invariants
//!
//! 1. The table is built once and never mutated afterwards.
//! 2. `execute(name)` on a registered, enabled command has exactly the effect
//!    of calling the supplied action directly.
//! 3. Registration order does not matter; names are unique (a later entry
//!    with the same name replaces the earlier one).

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;
use vista_core::{CommandError, CommandResult};

type Action = Rc<dyn Fn()>;
type Guard = Rc<dyn Fn() -> bool>;

/// An invokable wrapper around a zero-argument action.
///
/// Cloning a command shares the action.
#[derive(Clone)]
pub struct Command {
    action: Action,
    guard: Option<Guard>,
}

impl Command {
    /// Wrap `action`. The command is always executable.
    #[must_use]
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self {
            action: Rc::new(action),
            guard: None,
        }
    }

    /// Wrap `action` with a `can_execute` guard consulted by
    /// [`Command::try_execute`].
    #[must_use]
    pub fn guarded(action: impl Fn() + 'static, can_execute: impl Fn() -> bool + 'static) -> Self {
        Self {
            action: Rc::new(action),
            guard: Some(Rc::new(can_execute)),
        }
    }

    /// Whether the guard currently allows execution.
    #[must_use]
    pub fn can_execute(&self) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard())
    }

    /// Run the action unconditionally.
    pub fn execute(&self) {
        (self.action)();
    }

    /// Run the action if the guard allows it.
    ///
    /// Returns `false` without running when the guard refuses.
    pub fn try_execute(&self) -> bool {
        if !self.can_execute() {
            return false;
        }
        self.execute();
        true
    }

    /// Whether both commands wrap the same action.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.action, &other.action)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("guarded", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

/// Actions supplied by the owning component, keyed by command name.
///
/// Passed by value to the state constructor; an empty map is the way to say
/// "no commands".
#[derive(Default)]
pub struct CommandMap {
    entries: Vec<(String, Command)>,
}

impl CommandMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an always-enabled action.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, action: impl Fn() + 'static) -> Self {
        self.entries.push((name.into(), Command::new(action)));
        self
    }

    /// Add an action with a `can_execute` guard.
    #[must_use]
    pub fn with_guarded(
        mut self,
        name: impl Into<String>,
        action: impl Fn() + 'static,
        can_execute: impl Fn() -> bool + 'static,
    ) -> Self {
        self.entries
            .push((name.into(), Command::guarded(action, can_execute)));
        self
    }

    /// Number of entries (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CommandMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Commands a state exposes to the view layer, keyed by name.
#[derive(Default)]
pub struct CommandTable {
    commands: FxHashMap<String, Command>,
}

impl CommandTable {
    /// Wrap every entry of `map`.
    #[must_use]
    pub fn from_map(map: CommandMap) -> Self {
        let mut commands = FxHashMap::default();
        for (name, command) in map.entries {
            trace!(command = %name, "register command");
            commands.insert(name, command);
        }
        Self { commands }
    }

    /// The command bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Whether a command is bound to `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run the command bound to `name`.
    ///
    /// # Errors
    ///
    /// [`CommandError::Unknown`] if nothing is bound to `name`,
    /// [`CommandError::Disabled`] if its guard refuses.
    pub fn execute(&self, name: &str) -> CommandResult {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::Unknown(name.to_string()))?;
        if command.try_execute() {
            trace!(command = name, "command executed");
            Ok(())
        } else {
            Err(CommandError::Disabled(name.to_string()))
        }
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("names", &self.names())
            .finish()
    }
}
