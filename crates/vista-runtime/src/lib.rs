#![forbid(unsafe_code)]

//! Observable view-state base for Vista.
//!
//! # Role
//! A view layer keeps its UI-relevant data in state objects. This crate
//! supplies the machinery those objects share:
//!
//! - change notification: a generic per-field event plus per-field handlers
//!   registered by the owning component ([`StateCore`], [`ChangeHandlers`]);
//! - bound user actions exposed as named [`Command`]s;
//! - ordered copy, clone, and reload driven by explicit field descriptors
//!   ([`ObservableState`], [`FieldSet`]);
//! - observable containers that copies duplicate rather than alias
//!   ([`ObservableList`]).
//!
//! # Threading
//! Single-threaded. Every type here is `!Send` and every operation runs to
//! completion on the calling thread.

pub mod reactive;
pub mod state;

pub use reactive::{ListChange, ObservableContainer, ObservableList, Shared, Subscription};
pub use state::{
    ChangeEvent, ChangeHandlers, Command, CommandMap, CommandTable, FieldEntry, FieldInfo,
    FieldKind, FieldSet, ObservableState, StateCore,
};
pub use vista_core::{CommandError, CommandResult, CopyError, FieldKey, Order};
